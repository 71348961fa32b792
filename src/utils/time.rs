use crate::error::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Calendar day at the club. Bookings and weather readings are keyed on it.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::ValidationError(format!("Invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Parses a strict `HH:MM` clock time.
pub fn parse_clock(value: &str) -> AppResult<NaiveTime> {
    let value = value.trim();
    if value.len() != 5 {
        return Err(invalid_clock(value));
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| invalid_clock(value))
}

fn invalid_clock(value: &str) -> AppError {
    AppError::ValidationError(format!("Invalid time '{}', expected HH:MM", value))
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock() {
        let t = parse_clock("06:15").unwrap();
        assert_eq!(format_clock(t), "06:15");
        assert!(parse_clock("6:15").is_err());
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("06:15:00").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-07-04").unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()
        );
        assert!(parse_date("07/04/2025").is_err());
    }
}
