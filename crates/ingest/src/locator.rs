//! Resolves the campaign CSV from an ordered list of candidate locations.

use std::path::PathBuf;

use budget_core::{PlannerError, PlannerResult};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SourceLocator {
    candidates: Vec<PathBuf>,
}

impl SourceLocator {
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that exists as a file. Otherwise a load error naming
    /// every location tried.
    pub fn locate(&self) -> PlannerResult<PathBuf> {
        for candidate in &self.candidates {
            if candidate.is_file() {
                debug!(path = %candidate.display(), "Campaign data source found");
                return Ok(candidate.clone());
            }
        }
        Err(PlannerError::Load {
            attempted: self
                .candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            reason: "campaign data file not found".to_string(),
        })
    }
}
