//! Row subsets for a platform × campaign type (× country) selection.

use budget_core::{CampaignRecord, Dataset};

/// A borrowed view over the dataset rows matching a predicate.
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    pub platform: String,
    pub campaign_type: String,
    pub country: Option<String>,
    rows: Vec<&'a CampaignRecord>,
}

impl<'a> Segment<'a> {
    pub fn rows(&self) -> &[&'a CampaignRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        self.rows.iter().map(|r| r.cost).sum()
    }

    /// Summed in `u128`: a handful of rows near `u64::MAX` must not wrap.
    pub fn total_impressions(&self) -> u128 {
        self.rows.iter().map(|r| u128::from(r.impressions)).sum()
    }
}

/// Rows for a platform and campaign type. No match yields an empty segment,
/// not an error.
pub fn select_base<'a>(dataset: &'a Dataset, platform: &str, campaign_type: &str) -> Segment<'a> {
    Segment {
        platform: platform.to_string(),
        campaign_type: campaign_type.to_string(),
        country: None,
        rows: dataset
            .records()
            .iter()
            .filter(|r| r.platform == platform && r.campaign_type == campaign_type)
            .collect(),
    }
}

/// Narrow a base segment to rows for one country.
pub fn select_country<'a>(base: &Segment<'a>, country: &str) -> Segment<'a> {
    Segment {
        platform: base.platform.clone(),
        campaign_type: base.campaign_type.clone(),
        country: Some(country.to_string()),
        rows: base
            .rows
            .iter()
            .copied()
            .filter(|r| r.country.as_deref() == Some(country))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(platform: &str, ctype: &str, country: Option<&str>, cost: f64, imps: u64) -> CampaignRecord {
        CampaignRecord {
            status: "Enabled".into(),
            platform: platform.into(),
            campaign_type: ctype.into(),
            cost,
            impressions: imps,
            country: country.map(str::to_string),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                row("Google", "Search", Some("NL"), 1000.0, 500_000),
                row("Google", "Search", Some("BE"), 200.0, 50_000),
                row("Google", "Display", Some("NL"), 80.0, 40_000),
                row("Meta", "Search", Some("NL"), 10.0, 1_000),
            ],
            true,
        )
    }

    #[test]
    fn test_select_base() {
        let ds = dataset();
        let base = select_base(&ds, "Google", "Search");
        assert_eq!(base.len(), 2);
        assert_eq!(base.total_impressions(), 550_000);
        assert!((base.total_cost() - 1200.0).abs() < 1e-9);
        assert_eq!(base.country, None);
    }

    #[test]
    fn test_select_base_no_match_is_empty() {
        let ds = dataset();
        let base = select_base(&ds, "TikTok", "Search");
        assert!(base.is_empty());
        assert_eq!(base.total_impressions(), 0);
    }

    #[test]
    fn test_select_country() {
        let ds = dataset();
        let base = select_base(&ds, "Google", "Search");
        let nl = select_country(&base, "NL");
        assert_eq!(nl.len(), 1);
        assert_eq!(nl.total_impressions(), 500_000);
        assert_eq!(nl.country.as_deref(), Some("NL"));
        assert!(select_country(&base, "DE").is_empty());
    }

    #[test]
    fn test_total_impressions_does_not_wrap() {
        let ds = Dataset::new(
            vec![
                row("Google", "Search", Some("NL"), 10.0, u64::MAX),
                row("Google", "Search", Some("NL"), 10.0, 10),
            ],
            true,
        );
        let base = select_base(&ds, "Google", "Search");
        assert_eq!(base.total_impressions(), u128::from(u64::MAX) + 10);
    }
}
