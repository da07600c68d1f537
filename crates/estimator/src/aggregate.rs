//! Volume-weighted CPM.

use serde::Serialize;

use crate::segment::Segment;

/// Summed spend and delivery for a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CpmTotals {
    pub cost: f64,
    pub impressions: u128,
}

impl CpmTotals {
    pub fn of(segment: &Segment<'_>) -> Self {
        Self {
            cost: segment.total_cost(),
            impressions: segment.total_impressions(),
        }
    }

    /// `Σcost / Σimpressions × 1000`, or `None` when nothing was delivered.
    pub fn cpm(&self) -> Option<f64> {
        if self.impressions == 0 {
            return None;
        }
        Some(self.cost / self.impressions as f64 * 1000.0)
    }
}

/// CPM over a segment, weighting each row by its impressions. This is not
/// the mean of per-row CPMs.
pub fn aggregate_cpm(segment: &Segment<'_>) -> Option<f64> {
    CpmTotals::of(segment).cpm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{select_base, select_country};
    use budget_core::{CampaignRecord, Dataset};

    fn row(country: &str, cost: f64, imps: u64) -> CampaignRecord {
        CampaignRecord {
            status: "Enabled".into(),
            platform: "Google".into(),
            campaign_type: "Search".into(),
            cost,
            impressions: imps,
            country: Some(country.into()),
        }
    }

    #[test]
    fn test_weighted_cpm() {
        let ds = Dataset::new(
            vec![row("NL", 1000.0, 500_000), row("BE", 200.0, 50_000)],
            true,
        );
        let base = select_base(&ds, "Google", "Search");
        let cpm = aggregate_cpm(&base).unwrap();
        assert!((cpm - 1200.0 / 550_000.0 * 1000.0).abs() < 1e-12);

        // Mean of per-row CPMs would be (2.0 + 4.0) / 2 = 3.0.
        assert!((cpm - 3.0).abs() > 0.5);
    }

    #[test]
    fn test_empty_segment_is_undefined() {
        let ds = Dataset::new(vec![row("NL", 1000.0, 500_000)], true);
        assert_eq!(aggregate_cpm(&select_base(&ds, "Meta", "Search")), None);
        let base = select_base(&ds, "Google", "Search");
        assert_eq!(aggregate_cpm(&select_country(&base, "FR")), None);
    }

    #[test]
    fn test_merged_cpm_lies_between_parts() {
        let parts = [
            (vec![row("A", 30.0, 10_000)], vec![row("B", 1.0, 900_000)]),
            (vec![row("A", 5.0, 1_000), row("A", 7.0, 3_000)], vec![row("B", 5.0, 1_000)]),
            (vec![row("A", 0.01, 1)], vec![row("B", 12_000.0, 2_000_000)]),
        ];
        for (a, b) in parts {
            let ds_a = Dataset::new(a.clone(), true);
            let ds_b = Dataset::new(b.clone(), true);
            let ds_ab = Dataset::new(a.into_iter().chain(b).collect(), true);

            let cpm_a = aggregate_cpm(&select_base(&ds_a, "Google", "Search")).unwrap();
            let cpm_b = aggregate_cpm(&select_base(&ds_b, "Google", "Search")).unwrap();
            let cpm_ab = aggregate_cpm(&select_base(&ds_ab, "Google", "Search")).unwrap();

            let lo = cpm_a.min(cpm_b) - 1e-9;
            let hi = cpm_a.max(cpm_b) + 1e-9;
            assert!(lo <= cpm_ab && cpm_ab <= hi, "{cpm_ab} not within [{lo}, {hi}]");
        }
    }

    #[test]
    fn test_totals_cpm_zero_impressions() {
        let totals = CpmTotals {
            cost: 50.0,
            impressions: 0,
        };
        assert_eq!(totals.cpm(), None);
    }
}
