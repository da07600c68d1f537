//! Immutable, shareable collection of campaign rows.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::country::is_overall_label;
use crate::types::CampaignRecord;

/// Historical rows, fixed at construction. Cloning is cheap and clones share
/// the same rows, so concurrent readers never need a lock.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[CampaignRecord]>,
    has_country_column: bool,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Rows without positive cost and impressions are dropped here, so they
    /// can never reach an aggregation whichever way the dataset was built.
    pub fn new(records: Vec<CampaignRecord>, has_country_column: bool) -> Self {
        let records: Vec<CampaignRecord> = records
            .into_iter()
            .filter(|r| r.cost.is_finite() && r.cost > 0.0 && r.impressions > 0)
            .collect();
        Self {
            records: records.into(),
            has_country_column,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn records(&self) -> &[CampaignRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_country_column(&self) -> bool {
        self.has_country_column
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sorted, distinct platforms.
    pub fn platforms(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.platform.as_str()))
    }

    /// Sorted, distinct campaign types run on `platform`.
    pub fn campaign_types(&self, platform: &str) -> Vec<String> {
        distinct(
            self.records
                .iter()
                .filter(|r| r.platform == platform)
                .map(|r| r.campaign_type.as_str()),
        )
    }

    /// Individually selectable countries for a platform and campaign type.
    /// "All markets" labels are never listed.
    pub fn countries(&self, platform: &str, campaign_type: &str) -> Vec<String> {
        if !self.has_country_column {
            return Vec::new();
        }
        distinct(
            self.records
                .iter()
                .filter(|r| r.platform == platform && r.campaign_type == campaign_type)
                .filter_map(|r| r.country.as_deref())
                .filter(|c| !is_overall_label(c)),
        )
    }

    /// A new dataset holding only rows whose status matches one of
    /// `statuses` (case-insensitive). The loader itself keeps every status.
    pub fn retain_statuses(&self, statuses: &[&str]) -> Dataset {
        let wanted: Vec<String> = statuses.iter().map(|s| s.trim().to_lowercase()).collect();
        let records: Vec<CampaignRecord> = self
            .records
            .iter()
            .filter(|r| wanted.contains(&r.status.trim().to_lowercase()))
            .cloned()
            .collect();
        Dataset {
            records: records.into(),
            has_country_column: self.has_country_column,
            source: self.source.clone(),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
