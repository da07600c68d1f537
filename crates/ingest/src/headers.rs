//! Header normalization and column mapping.

use budget_core::{PlannerError, PlannerResult};

/// Canonical fields the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Status,
    Platform,
    CampaignType,
    Cost,
    Impressions,
    Country,
}

impl Field {
    pub const REQUIRED: [Field; 5] = [
        Field::Status,
        Field::Platform,
        Field::CampaignType,
        Field::Cost,
        Field::Impressions,
    ];

    /// Column name as it appears in a normalized header.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::Status => "campaign status",
            Field::Platform => "platform",
            Field::CampaignType => "campaign type",
            Field::Cost => "cost",
            Field::Impressions => "impressions",
            Field::Country => "country",
        }
    }
}

/// Trim and lowercase a raw header. Any spacing variant of
/// "impression"/"impressions" collapses to `impressions`.
pub fn normalize_header(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let compact: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();
    if compact == "impression" || compact == "impressions" {
        return Field::Impressions.column_name().to_string();
    }
    lowered
}

fn field_for(normalized: &str) -> Option<Field> {
    match normalized {
        "campaign status" | "campaign_status" => Some(Field::Status),
        "platform" => Some(Field::Platform),
        "campaign type" | "campaign_type" => Some(Field::CampaignType),
        "cost" => Some(Field::Cost),
        "impressions" => Some(Field::Impressions),
        "country" => Some(Field::Country),
        _ => None,
    }
}

/// Positions of the canonical fields within a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub status: usize,
    pub platform: usize,
    pub campaign_type: usize,
    pub cost: usize,
    pub impressions: usize,
    pub country: Option<usize>,
}

impl ColumnMap {
    /// Map a header row onto canonical fields. The first column wins when a
    /// field appears twice. Fails with the full list of missing fields.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> PlannerResult<Self> {
        let mut found: [Option<usize>; 6] = [None; 6];
        for (idx, raw) in headers.into_iter().enumerate() {
            if let Some(field) = field_for(&normalize_header(raw)) {
                let slot = &mut found[field as usize];
                if slot.is_none() {
                    *slot = Some(idx);
                }
            }
        }

        let missing: Vec<String> = Field::REQUIRED
            .iter()
            .filter(|f| found[**f as usize].is_none())
            .map(|f| f.column_name().to_string())
            .collect();

        match found {
            [Some(status), Some(platform), Some(campaign_type), Some(cost), Some(impressions), country] => {
                Ok(Self {
                    status,
                    platform,
                    campaign_type,
                    cost,
                    impressions,
                    country,
                })
            }
            _ => Err(PlannerError::Schema { missing }),
        }
    }

    pub fn has_country(&self) -> bool {
        self.country.is_some()
    }
}
