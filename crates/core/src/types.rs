use serde::{Deserialize, Serialize};

use crate::country::CountryChoice;

/// One historical campaign row. Only rows with positive cost and
/// impressions make it into a [`crate::Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub status: String,
    pub platform: String,
    pub campaign_type: String,
    pub cost: f64,
    pub impressions: u64,
    #[serde(default)]
    pub country: Option<String>,
}

impl CampaignRecord {
    /// Row-level CPM, kept for reference. Aggregation never averages these.
    pub fn cpm(&self) -> Option<f64> {
        if self.impressions == 0 {
            return None;
        }
        Some(self.cost / self.impressions as f64 * 1000.0)
    }
}

/// A user selection as supplied by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub platform: String,
    pub campaign_type: String,
    pub country: CountryChoice,
}

impl Selection {
    pub fn new(
        platform: impl Into<String>,
        campaign_type: impl Into<String>,
        country: Option<&str>,
    ) -> Self {
        Self {
            platform: platform.into(),
            campaign_type: campaign_type.into(),
            country: CountryChoice::parse(country),
        }
    }
}

/// Which aggregation level supplied the effective CPM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Country,
    Overall,
    Undefined,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Country => "country",
            Self::Overall => "overall",
            Self::Undefined => "undefined",
        };
        f.write_str(s)
    }
}

/// Why the resolver landed where it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum ResolutionReason {
    /// The country segment met the impression threshold.
    CountryVolumeSufficient { country_impressions: u128 },
    /// The dataset carries no country column.
    NoCountryColumn,
    /// The user asked for all markets.
    NoCountrySelected,
    /// Country volume was below the threshold; the overall CPM was used.
    InsufficientCountryVolume {
        country: String,
        country_impressions: u128,
        threshold: u64,
    },
    /// The chosen source summed to zero impressions.
    ZeroDenominator,
}

/// Output of the CPM resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCpm {
    pub value: Option<f64>,
    pub provenance: Provenance,
    pub reason: ResolutionReason,
}

impl ResolvedCpm {
    /// True when a specific country was requested but its volume was too
    /// thin, so the user should be told the overall CPM was used instead.
    pub fn is_fallback(&self) -> bool {
        matches!(self.reason, ResolutionReason::InsufficientCountryVolume { .. })
    }
}

/// Budget derived from a target volume and a CPM. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetEstimate {
    pub total_budget: f64,
    pub daily_budget: f64,
    pub daily_impressions: f64,
}
