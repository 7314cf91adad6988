//! Numeric string coercion for edit fields.

use share_types::{clamp_score, ShareError, ShareResult};

/// Parse a numeric field the way a browser number input coerces it.
///
/// Surrounding whitespace and `_`/`,` digit grouping are ignored. An empty
/// field reads as `0`; anything else that does not parse is `NaN`, which
/// the individual operations then reject or coerce.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a score field: truncated toward zero, clamped to the score range.
pub fn parse_score(raw: &str) -> ShareResult<u32> {
    let value = parse_number(raw);
    if value.is_nan() {
        return Err(ShareError::InvalidNumber(raw.to_string()));
    }
    Ok(clamp_score(value.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_numbers() {
        assert_eq!(parse_number("1,000,000"), 1_000_000.0);
        assert_eq!(parse_number(" 2_500.75 "), 2500.75);
        assert_eq!(parse_number("-12"), -12.0);
    }

    #[test]
    fn empty_is_zero_and_garbage_is_nan() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("   "), 0.0);
        assert!(parse_number("ten").is_nan());
        assert!(parse_number("1.2.3").is_nan());
    }

    #[test]
    fn scores_truncate_and_clamp() {
        assert_eq!(parse_score("3.9").unwrap(), 3);
        assert_eq!(parse_score("-4").unwrap(), 0);
        assert_eq!(parse_score("99999").unwrap(), 10_000);
        assert_eq!(parse_score("").unwrap(), 0);
        assert!(matches!(parse_score("abc"), Err(ShareError::InvalidNumber(_))));
    }
}
