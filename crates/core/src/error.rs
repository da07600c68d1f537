use thiserror::Error;

pub type PlannerResult<T> = Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Unable to load campaign data: {reason} (attempted: {})", attempted.join(", "))]
    Load {
        attempted: Vec<String>,
        reason: String,
    },

    #[error("Missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("No data for platform '{platform}' and campaign type '{campaign_type}'")]
    EmptySegment {
        platform: String,
        campaign_type: String,
    },

    #[error("Unable to compute CPM for platform '{platform}' and campaign type '{campaign_type}'")]
    UndefinedCpm {
        platform: String,
        campaign_type: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlannerError {
    pub fn load(attempted: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            attempted: vec![attempted.into()],
            reason: reason.to_string(),
        }
    }

    /// Load, schema and configuration failures end the session; the rest
    /// only affect the current selection.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Load { .. } | Self::Schema { .. } | Self::Config(_)
        )
    }
}

impl From<config::ConfigError> for PlannerError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_lists_attempted_locations() {
        let err = PlannerError::Load {
            attempted: vec!["data/campaigns.csv".into(), "/srv/campaigns.csv".into()],
            reason: "file not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/campaigns.csv, /srv/campaigns.csv"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_selection_errors_are_not_fatal() {
        let err = PlannerError::EmptySegment {
            platform: "Google".into(),
            campaign_type: "Video".into(),
        };
        assert!(!err.is_fatal());
        assert!(!PlannerError::InvalidInput("flight days must be >= 1".into()).is_fatal());
    }

    #[test]
    fn test_schema_error_message() {
        let err = PlannerError::Schema {
            missing: vec!["cost".into(), "impressions".into()],
        };
        assert_eq!(err.to_string(), "Missing required columns: cost, impressions");
    }
}
