pub mod config;
pub mod country;
pub mod dataset;
pub mod error;
pub mod types;

pub use crate::config::{AppConfig, DEFAULT_IMPRESSION_THRESHOLD};
pub use country::CountryChoice;
pub use dataset::Dataset;
pub use error::{PlannerError, PlannerResult};
pub use types::{
    BudgetEstimate, CampaignRecord, Provenance, ResolutionReason, ResolvedCpm, Selection,
};
