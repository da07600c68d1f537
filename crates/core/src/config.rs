use serde::Deserialize;

use crate::error::PlannerResult;

/// Minimum country-level impression volume before a country CPM is trusted.
pub const DEFAULT_IMPRESSION_THRESHOLD: u64 = 100_000;

/// Root application configuration. Loaded from an optional
/// `impression-budget.toml` file and environment variables with the prefix
/// `IMPRESSION_BUDGET__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Candidate locations of the campaign CSV, tried in order.
    #[serde(default = "default_data_paths")]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default = "default_impression_threshold")]
    pub impression_threshold: u64,
    #[serde(default = "default_target_impressions")]
    pub default_target_impressions: u64,
    #[serde(default = "default_flight_days")]
    pub default_flight_days: u32,
}

fn default_data_paths() -> Vec<String> {
    vec!["data/campaigns.csv".to_string()]
}
fn default_impression_threshold() -> u64 {
    DEFAULT_IMPRESSION_THRESHOLD
}
fn default_target_impressions() -> u64 {
    5_000_000
}
fn default_flight_days() -> u32 {
    14
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            paths: default_data_paths(),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            impression_threshold: default_impression_threshold(),
            default_target_impressions: default_target_impressions(),
            default_flight_days: default_flight_days(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load() -> PlannerResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("impression-budget").required(false))
            .add_source(
                config::Environment::with_prefix("IMPRESSION_BUDGET")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("data.paths"),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
