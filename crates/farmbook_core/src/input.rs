//! Parse-with-default helpers for raw form input.
//!
//! Malformed numeric input is never an error: every boundary that receives
//! user text goes through one of these helpers.
//!
//! | field        | accepted                     | fallback |
//! |--------------|------------------------------|----------|
//! | measurement  | leading decimal, >= 0        | `0`      |
//! | unit price   | leading decimal, >= 0        | `0`      |
//! | selection    | leading integer, clamped 1–5 | `1`      |

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowest accepted selection multiplier.
pub const SELECTION_MIN: u32 = 1;
/// Highest accepted selection multiplier.
pub const SELECTION_MAX: u32 = 5;

static LEADING_DECIMAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid decimal regex")
});
static LEADING_INTEGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer regex"));

/// Parses a plot measurement. Blank, unparseable, negative or non-finite
/// input becomes `0`.
pub fn parse_measurement(raw: &str) -> f64 {
    parse_non_negative(raw)
}

/// Parses a unit price. Same rules as [`parse_measurement`].
pub fn parse_unit_price(raw: &str) -> f64 {
    parse_non_negative(raw)
}

/// Parses a selection multiplier from its leading integer.
///
/// Blank, unparseable or zero input becomes `1`; other values are clamped
/// into `1..=5`.
pub fn parse_selection(raw: &str) -> u32 {
    let Some(matched) = LEADING_INTEGER_RE.find(raw.trim()) else {
        return SELECTION_MIN;
    };
    match matched.as_str().parse::<i64>() {
        Ok(0) | Err(_) => SELECTION_MIN,
        Ok(value) => clamp_selection(value),
    }
}

/// Clamps an already-numeric selection into the accepted range.
pub fn clamp_selection(value: i64) -> u32 {
    value.clamp(i64::from(SELECTION_MIN), i64::from(SELECTION_MAX)) as u32
}

/// Sanitizes an already-numeric measurement or price.
pub fn sanitize_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn parse_non_negative(raw: &str) -> f64 {
    LEADING_DECIMAL_RE
        .find(raw.trim())
        .and_then(|matched| matched.as_str().parse::<f64>().ok())
        .map_or(0.0, sanitize_non_negative)
}

#[cfg(test)]
mod tests {
    use super::{clamp_selection, parse_measurement, parse_selection, parse_unit_price};

    #[test]
    fn measurement_uses_leading_decimal_prefix() {
        assert_eq!(parse_measurement("2.5"), 2.5);
        assert_eq!(parse_measurement(" 3.75 bigha"), 3.75);
        assert_eq!(parse_measurement(".5"), 0.5);
        assert_eq!(parse_measurement("1e2"), 100.0);
    }

    #[test]
    fn measurement_falls_back_to_zero() {
        assert_eq!(parse_measurement(""), 0.0);
        assert_eq!(parse_measurement("abc"), 0.0);
        assert_eq!(parse_measurement("-4"), 0.0);
        assert_eq!(parse_measurement("1e999"), 0.0);
    }

    #[test]
    fn unit_price_matches_measurement_rules() {
        assert_eq!(parse_unit_price("150"), 150.0);
        assert_eq!(parse_unit_price("₹150"), 0.0);
    }

    #[test]
    fn selection_defaults_to_one_and_clamps() {
        assert_eq!(parse_selection(""), 1);
        assert_eq!(parse_selection("x"), 1);
        assert_eq!(parse_selection("0"), 1);
        assert_eq!(parse_selection("3"), 3);
        assert_eq!(parse_selection("2.9"), 2);
        assert_eq!(parse_selection("9"), 5);
        assert_eq!(parse_selection("-2"), 1);
        assert_eq!(clamp_selection(i64::MAX), 5);
    }
}
