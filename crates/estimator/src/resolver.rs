//! Country-versus-overall CPM resolution.
//!
//! A country CPM is only trusted once the country segment has delivered at
//! least `impression_threshold` impressions (inclusive). Below that, or when
//! no country applies, the overall platform × campaign type CPM is used.

use budget_core::{
    CountryChoice, Provenance, ResolutionReason, ResolvedCpm, DEFAULT_IMPRESSION_THRESHOLD,
};
use tracing::{debug, warn};

use crate::aggregate::aggregate_cpm;
use crate::segment::{select_country, Segment};

/// Per-computation resolver state. Nothing carries over between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    NoCountrySelected { has_country_column: bool },
    CountrySelected(String),
}

impl ResolutionState {
    pub fn from_choice(choice: &CountryChoice, has_country_column: bool) -> Self {
        match choice.market() {
            Some(country) if has_country_column => Self::CountrySelected(country.to_string()),
            _ => Self::NoCountrySelected { has_country_column },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpmResolver {
    impression_threshold: u64,
}

impl Default for CpmResolver {
    fn default() -> Self {
        Self::new(DEFAULT_IMPRESSION_THRESHOLD)
    }
}

impl CpmResolver {
    pub fn new(impression_threshold: u64) -> Self {
        Self {
            impression_threshold,
        }
    }

    pub fn impression_threshold(&self) -> u64 {
        self.impression_threshold
    }

    /// Resolve the effective CPM for `base` under `state`.
    pub fn resolve(&self, base: &Segment<'_>, state: &ResolutionState) -> ResolvedCpm {
        let resolved = match state {
            ResolutionState::NoCountrySelected { has_country_column } => {
                let reason = if *has_country_column {
                    ResolutionReason::NoCountrySelected
                } else {
                    ResolutionReason::NoCountryColumn
                };
                overall(base, reason)
            }
            ResolutionState::CountrySelected(country) => {
                let segment = select_country(base, country);
                let country_impressions = segment.total_impressions();
                if country_impressions >= u128::from(self.impression_threshold) {
                    match aggregate_cpm(&segment) {
                        Some(cpm) => ResolvedCpm {
                            value: Some(cpm),
                            provenance: Provenance::Country,
                            reason: ResolutionReason::CountryVolumeSufficient {
                                country_impressions,
                            },
                        },
                        None => undefined(),
                    }
                } else {
                    warn!(
                        country = %country,
                        country_impressions,
                        threshold = self.impression_threshold,
                        "Country volume below threshold, falling back to overall CPM"
                    );
                    overall(
                        base,
                        ResolutionReason::InsufficientCountryVolume {
                            country: country.clone(),
                            country_impressions,
                            threshold: self.impression_threshold,
                        },
                    )
                }
            }
        };

        metrics::counter!("estimator.resolution", "provenance" => resolved.provenance.to_string())
            .increment(1);
        debug!(
            platform = %base.platform,
            campaign_type = %base.campaign_type,
            provenance = %resolved.provenance,
            cpm = ?resolved.value,
            "CPM resolved"
        );
        resolved
    }
}

fn overall(base: &Segment<'_>, reason: ResolutionReason) -> ResolvedCpm {
    match aggregate_cpm(base) {
        Some(cpm) => ResolvedCpm {
            value: Some(cpm),
            provenance: Provenance::Overall,
            reason,
        },
        None => undefined(),
    }
}

fn undefined() -> ResolvedCpm {
    ResolvedCpm {
        value: None,
        provenance: Provenance::Undefined,
        reason: ResolutionReason::ZeroDenominator,
    }
}
