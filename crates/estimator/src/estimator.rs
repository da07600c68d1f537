//! End-to-end estimation for one selection. Each call recomputes from the
//! dataset; nothing is cached between selections.

use budget_core::config::EstimatorConfig;
use budget_core::{
    BudgetEstimate, Dataset, PlannerError, PlannerResult, ResolvedCpm, Selection,
};
use serde::Serialize;
use tracing::info;

use crate::projector::project;
use crate::resolver::{CpmResolver, ResolutionState};
use crate::segment::select_base;

/// Result of a full estimation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub selection: Selection,
    pub cpm: ResolvedCpm,
    pub budget: BudgetEstimate,
    pub target_impressions: u64,
    pub flight_days: u32,
    /// Rows in the platform × campaign type segment.
    pub segment_rows: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetEstimator {
    resolver: CpmResolver,
}

impl BudgetEstimator {
    pub fn new(resolver: CpmResolver) -> Self {
        Self { resolver }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(CpmResolver::new(config.impression_threshold))
    }

    pub fn resolver(&self) -> &CpmResolver {
        &self.resolver
    }

    /// Effective CPM for a selection. An empty base segment and an undefined
    /// CPM are reported as distinct errors.
    pub fn resolve(&self, dataset: &Dataset, selection: &Selection) -> PlannerResult<ResolvedCpm> {
        self.resolve_segment(dataset, selection).map(|(cpm, _)| cpm)
    }

    /// Resolve the CPM and project a budget for the target volume and flight.
    pub fn estimate(
        &self,
        dataset: &Dataset,
        selection: &Selection,
        target_impressions: u64,
        flight_days: u32,
    ) -> PlannerResult<Estimate> {
        validate_inputs(target_impressions, flight_days)?;

        let (cpm, segment_rows) = self.resolve_segment(dataset, selection)?;
        let value = cpm.value.ok_or_else(|| undefined_cpm(selection))?;
        let budget = project(target_impressions, value, flight_days)?;

        info!(
            platform = %selection.platform,
            campaign_type = %selection.campaign_type,
            country = %selection.country,
            provenance = %cpm.provenance,
            cpm = value,
            total_budget = budget.total_budget,
            "Budget estimated"
        );

        Ok(Estimate {
            selection: selection.clone(),
            cpm,
            budget,
            target_impressions,
            flight_days,
            segment_rows,
        })
    }

    fn resolve_segment(
        &self,
        dataset: &Dataset,
        selection: &Selection,
    ) -> PlannerResult<(ResolvedCpm, usize)> {
        let base = select_base(dataset, &selection.platform, &selection.campaign_type);
        if base.is_empty() {
            return Err(PlannerError::EmptySegment {
                platform: selection.platform.clone(),
                campaign_type: selection.campaign_type.clone(),
            });
        }

        let state = ResolutionState::from_choice(&selection.country, dataset.has_country_column());
        let resolved = self.resolver.resolve(&base, &state);
        if resolved.value.is_none() {
            return Err(undefined_cpm(selection));
        }
        Ok((resolved, base.len()))
    }
}

fn validate_inputs(target_impressions: u64, flight_days: u32) -> PlannerResult<()> {
    if target_impressions == 0 {
        return Err(PlannerError::InvalidInput(
            "target impressions must be greater than zero".to_string(),
        ));
    }
    if flight_days == 0 {
        return Err(PlannerError::InvalidInput(
            "flight length must be at least one day".to_string(),
        ));
    }
    Ok(())
}

fn undefined_cpm(selection: &Selection) -> PlannerError {
    PlannerError::UndefinedCpm {
        platform: selection.platform.clone(),
        campaign_type: selection.campaign_type.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_core::{CampaignRecord, Provenance};

    fn row(platform: &str, country: &str, cost: f64, imps: u64) -> CampaignRecord {
        CampaignRecord {
            status: "Enabled".into(),
            platform: platform.into(),
            campaign_type: "Search".into(),
            cost,
            impressions: imps,
            country: Some(country.into()),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                row("Google", "NL", 1000.0, 500_000),
                row("Google", "BE", 200.0, 50_000),
            ],
            true,
        )
    }

    #[test]
    fn test_estimate_country() {
        let estimate = BudgetEstimator::default()
            .estimate(&dataset(), &Selection::new("Google", "Search", Some("NL")), 1_000_000, 10)
            .unwrap();
        assert_eq!(estimate.cpm.provenance, Provenance::Country);
        assert!((estimate.budget.total_budget - 2_000.0).abs() < 1e-9);
        assert!((estimate.budget.daily_budget - 200.0).abs() < 1e-9);
        assert_eq!(estimate.segment_rows, 2);
    }

    #[test]
    fn test_from_config_threshold() {
        let config = EstimatorConfig {
            impression_threshold: 10_000,
            ..EstimatorConfig::default()
        };
        let estimator = BudgetEstimator::from_config(&config);
        assert_eq!(estimator.resolver().impression_threshold(), 10_000);

        let resolved = estimator
            .resolve(&dataset(), &Selection::new("Google", "Search", Some("BE")))
            .unwrap();
        assert_eq!(resolved.provenance, Provenance::Country);
        assert!((resolved.value.unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_input_rejected_before_lookup() {
        let err = BudgetEstimator::default()
            .estimate(&dataset(), &Selection::new("Nobody", "Search", None), 0, 14)
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn test_undefined_cpm_is_distinct_from_empty_segment() {
        // A zero threshold accepts an empty country segment, whose CPM has no
        // denominator.
        let estimator = BudgetEstimator::new(CpmResolver::new(0));
        let selection = Selection::new("Google", "Search", Some("FR"));

        let err = estimator.resolve(&dataset(), &selection).unwrap_err();
        assert!(matches!(err, PlannerError::UndefinedCpm { .. }));
        assert!(!err.is_fatal());

        let err = estimator
            .estimate(&dataset(), &selection, 1_000_000, 7)
            .unwrap_err();
        assert!(matches!(err, PlannerError::UndefinedCpm { .. }));
    }

    #[test]
    fn test_empty_segment() {
        let err = BudgetEstimator::default()
            .resolve(&dataset(), &Selection::new("Meta", "Search", None))
            .unwrap_err();
        assert!(matches!(err, PlannerError::EmptySegment { .. }));
        assert!(!err.is_fatal());
    }
}
