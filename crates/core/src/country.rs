//! Country label canonicalization.
//!
//! Source data marks market-wide rows with several spellings ("All",
//! "Overall", "All/Overall"). They all mean "no country filter" and are never
//! offered as an individual country.

use serde::{Deserialize, Serialize};

/// Labels (lowercased, trimmed) equivalent to "all markets".
pub const OVERALL_LABELS: [&str; 3] = ["all", "overall", "all/overall"];

/// Display label used for the market-wide choice.
pub const OVERALL_DISPLAY: &str = "Overall";

pub fn is_overall_label(label: &str) -> bool {
    let normalized = label.trim().to_lowercase();
    OVERALL_LABELS.contains(&normalized.as_str())
}

/// The user's country choice after canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "country")]
pub enum CountryChoice {
    Overall,
    Market(String),
}

impl CountryChoice {
    /// Blank input and any "all markets" spelling become `Overall`.
    pub fn parse(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            None => Self::Overall,
            Some("") => Self::Overall,
            Some(l) if is_overall_label(l) => Self::Overall,
            Some(l) => Self::Market(l.to_string()),
        }
    }

    pub fn market(&self) -> Option<&str> {
        match self {
            Self::Overall => None,
            Self::Market(c) => Some(c),
        }
    }
}

impl std::fmt::Display for CountryChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overall => f.write_str(OVERALL_DISPLAY),
            Self::Market(c) => f.write_str(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_spellings() {
        for label in ["All", "ALL", " overall ", "All/Overall", "all/overall"] {
            assert!(is_overall_label(label), "{label} should mean all markets");
            assert_eq!(CountryChoice::parse(Some(label)), CountryChoice::Overall);
        }
        assert!(!is_overall_label("NL"));
        assert!(!is_overall_label("Allemagne"));
    }

    #[test]
    fn test_parse_market() {
        assert_eq!(CountryChoice::parse(None), CountryChoice::Overall);
        assert_eq!(CountryChoice::parse(Some("  ")), CountryChoice::Overall);
        assert_eq!(
            CountryChoice::parse(Some(" NL ")),
            CountryChoice::Market("NL".to_string())
        );
        assert_eq!(CountryChoice::parse(Some("BE")).market(), Some("BE"));
    }
}
