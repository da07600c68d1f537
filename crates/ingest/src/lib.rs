//! Campaign data ingestion: locating the CSV source, normalizing its headers,
//! coercing numeric columns and dropping rows that cannot contribute to a CPM.

#![warn(clippy::unwrap_used)]

pub mod headers;
pub mod loader;
pub mod locator;
pub mod numeric;

pub use loader::{DatasetLoader, LoadReport};
pub use locator::SourceLocator;
