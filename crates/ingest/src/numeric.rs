//! Lenient numeric coercion for exported spreadsheet values.
//!
//! Unparsable cells yield `None`, never zero, so they fall out at the
//! positivity filter instead of being counted as real data.

fn strip_separators(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '\u{a0}' | '\u{202f}' | ' '))
        .collect()
}

/// Parse a cost such as `1,234.56`. Thousands separators are stripped.
pub fn parse_cost(raw: &str) -> Option<f64> {
    let cleaned = strip_separators(raw);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an impression count. Whole-valued decimals (`1200.0`) are accepted
/// since spreadsheet exports often write integers that way; fractional or
/// negative counts are rejected.
pub fn parse_impressions(raw: &str) -> Option<u64> {
    let cleaned = strip_separators(raw);
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(v) = cleaned.parse::<u64>() {
        return Some(v);
    }
    let v = cleaned.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v < u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost("1000"), Some(1000.0));
        assert_eq!(parse_cost(" 1,234.50 "), Some(1234.5));
        assert_eq!(parse_cost("12\u{a0}500"), Some(12500.0));
        assert_eq!(parse_cost("-5"), Some(-5.0));
        assert_eq!(parse_cost(""), None);
        assert_eq!(parse_cost("n/a"), None);
        assert_eq!(parse_cost("NaN"), None);
    }

    #[test]
    fn test_parse_impressions() {
        assert_eq!(parse_impressions("500000"), Some(500_000));
        assert_eq!(parse_impressions("1,000,000"), Some(1_000_000));
        assert_eq!(parse_impressions("1200.0"), Some(1200));
        assert_eq!(parse_impressions("1e19"), Some(10_000_000_000_000_000_000));
        assert_eq!(parse_impressions("18446744073709551616"), None);
        assert_eq!(parse_impressions("12.5"), None);
        assert_eq!(parse_impressions("-3"), None);
        assert_eq!(parse_impressions("--"), None);
        assert_eq!(parse_impressions(""), None);
    }
}
