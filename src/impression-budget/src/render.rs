//! Human-readable output. Rounding to cents happens only here.

use std::fmt::Write as _;

use budget_core::{ResolutionReason, ResolvedCpm};
use budget_estimator::Estimate;
use serde::Serialize;

/// Format with thousands separators and a fixed number of decimals.
pub fn format_amount(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Disclosure line for the CPM's provenance, if one is warranted.
pub fn disclosure(cpm: &ResolvedCpm) -> Option<String> {
    match &cpm.reason {
        ResolutionReason::InsufficientCountryVolume {
            country,
            country_impressions,
            threshold,
        } => Some(format!(
            "{country} has only {} impressions (< {}); using overall CPM instead",
            format_amount(*country_impressions as f64, 0),
            format_amount(*threshold as f64, 0),
        )),
        ResolutionReason::NoCountryColumn => {
            Some("No country column in the data; using overall CPM".to_string())
        }
        _ => None,
    }
}

pub fn estimate_text(estimate: &Estimate, currency: &str) -> String {
    let mut out = String::new();
    let cpm = estimate.cpm.value.unwrap_or_default();
    let _ = writeln!(
        out,
        "Segment:            {} / {} / {} ({} rows)",
        estimate.selection.platform,
        estimate.selection.campaign_type,
        estimate.selection.country,
        estimate.segment_rows
    );
    let _ = writeln!(
        out,
        "Effective CPM:      {} {} ({})",
        format_amount(cpm, 2),
        currency,
        estimate.cpm.provenance
    );
    if let Some(note) = disclosure(&estimate.cpm) {
        let _ = writeln!(out, "Note:               {note}");
    }
    let _ = writeln!(
        out,
        "Target impressions: {} over {} days",
        format_amount(estimate.target_impressions as f64, 0),
        estimate.flight_days
    );
    let _ = writeln!(
        out,
        "Estimated budget:   {} {}",
        format_amount(estimate.budget.total_budget, 2),
        currency
    );
    let _ = writeln!(
        out,
        "Daily budget:       {} {}",
        format_amount(estimate.budget.daily_budget, 2),
        currency
    );
    let _ = writeln!(
        out,
        "Daily impressions:  {}",
        format_amount(estimate.budget.daily_impressions, 0)
    );
    out
}

/// Selectable values, as listed by the `options` command.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Options {
    pub platforms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
}

pub fn options_text(options: &Options) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Platforms: {}", options.platforms.join(", "));
    if let Some(types) = &options.campaign_types {
        let _ = writeln!(out, "Campaign types: {}", types.join(", "));
    }
    if let Some(countries) = &options.countries {
        let mut listed = vec![budget_core::country::OVERALL_DISPLAY.to_string()];
        listed.extend(countries.iter().cloned());
        let _ = writeln!(out, "Countries: {}", listed.join(", "));
    }
    out
}
