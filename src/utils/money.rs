//! Amounts are stored as integer cents and shown to clients as dollars.

use crate::error::{AppError, AppResult};

pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Largest single price accepted from a client, in dollars.
pub const MAX_AMOUNT_DOLLARS: f64 = 1_000_000.0;

/// Converts a client-supplied dollar amount. Negative, non-finite and
/// oversized values are rejected.
pub fn dollars_to_cents(dollars: f64) -> AppResult<i64> {
    if !dollars.is_finite() || !(0.0..=MAX_AMOUNT_DOLLARS).contains(&dollars) {
        return Err(AppError::ValidationError(format!(
            "Invalid amount: {}",
            dollars
        )));
    }
    Ok((dollars * 100.0).round() as i64)
}

/// Parses a stored decimal-dollar string such as `"12.50"`.
pub fn parse_dollars(value: &str) -> Option<i64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|d| dollars_to_cents(d).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(cents_to_dollars(1250), 12.5);
        assert_eq!(dollars_to_cents(12.5).unwrap(), 1250);
        assert_eq!(dollars_to_cents(19.99).unwrap(), 1999);
        assert!(dollars_to_cents(-1.0).is_err());
        assert!(dollars_to_cents(f64::NAN).is_err());
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        assert_eq!(dollars_to_cents(MAX_AMOUNT_DOLLARS).unwrap(), 100_000_000);
        assert!(dollars_to_cents(MAX_AMOUNT_DOLLARS + 0.01).is_err());
        assert!(dollars_to_cents(1e18).is_err());
        assert!(dollars_to_cents(f64::INFINITY).is_err());
        assert_eq!(parse_dollars("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_dollars() {
        assert_eq!(parse_dollars("8.00"), Some(800));
        assert_eq!(parse_dollars(" 22 "), Some(2200));
        assert_eq!(parse_dollars("abc"), None);
        assert_eq!(parse_dollars("-3"), None);
    }
}
