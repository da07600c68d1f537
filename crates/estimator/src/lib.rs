//! Budget estimation from historical CPM: segment selection, volume-weighted
//! CPM aggregation, country/overall resolution and daily pacing.

#![warn(clippy::unwrap_used)]

pub mod aggregate;
pub mod estimator;
pub mod projector;
pub mod resolver;
pub mod segment;

pub use aggregate::{aggregate_cpm, CpmTotals};
pub use estimator::{BudgetEstimator, Estimate};
pub use projector::project;
pub use resolver::{CpmResolver, ResolutionState};
pub use segment::{select_base, select_country, Segment};
