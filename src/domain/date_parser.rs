// Date and time-of-day parsing for query parameters
use chrono::{Datelike, NaiveDate, NaiveTime};
use thiserror::Error;

/// Trial order matters: ambiguous input such as `01-02-2024` is read as
/// day-month-year before month-day-year is attempted.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%m-%d-%Y"];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date format: {input}")]
pub struct InvalidDateFormat {
    pub input: String,
}

impl InvalidDateFormat {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Parse a calendar date. Empty or absent input is `Ok(None)`.
///
/// A trailing time part (`T10:00:00`, ` 10:00:00`) or fractional seconds are
/// discarded first, and `/` is accepted in place of `-`.
pub fn parse_date(input: Option<&str>) -> Result<Option<NaiveDate>, InvalidDateFormat> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let date_part = raw
        .split('.')
        .next()
        .and_then(|s| s.split(['T', ' ']).next())
        .unwrap_or(raw)
        .replace('/', "-");

    DATE_FORMATS
        .iter()
        .find_map(|format| {
            NaiveDate::parse_from_str(&date_part, format)
                .ok()
                .filter(|d| (1000..=9999).contains(&d.year()))
        })
        .map(Some)
        .ok_or_else(|| InvalidDateFormat::new(raw))
}

/// Parse a time of day (`HH:MM:SS` or `HH:MM`). Empty or absent input is
/// `Ok(None)`.
pub fn parse_time(input: Option<&str>) -> Result<Option<NaiveTime>, InvalidDateFormat> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let without_fraction = raw.split('.').next().unwrap_or(raw);
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(without_fraction, format).ok())
        .map(Some)
        .ok_or_else(|| InvalidDateFormat::new(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_iso_and_day_first_agree() {
        assert_eq!(parse_date(Some("2024-03-05")), Ok(date(2024, 3, 5)));
        assert_eq!(parse_date(Some("05-03-2024")), Ok(date(2024, 3, 5)));
    }

    #[test]
    fn test_ambiguous_input_prefers_day_first() {
        assert_eq!(parse_date(Some("01-02-2024")), Ok(date(2024, 2, 1)));
    }

    #[test]
    fn test_falls_through_to_month_first() {
        assert_eq!(parse_date(Some("12-31-2024")), Ok(date(2024, 12, 31)));
    }

    #[test]
    fn test_empty_input_is_none() {
        assert_eq!(parse_date(None), Ok(None));
        assert_eq!(parse_date(Some("")), Ok(None));
        assert_eq!(parse_date(Some("   ")), Ok(None));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(
            parse_date(Some("not-a-date")),
            Err(InvalidDateFormat {
                input: "not-a-date".to_string()
            })
        );
        assert!(parse_date(Some("2024-13-45")).is_err());
        assert!(parse_date(Some("05-03-24")).is_err());
    }

    #[test]
    fn test_strips_time_and_fraction() {
        assert_eq!(
            parse_date(Some("2024-03-05T10:00:00.123456")),
            Ok(date(2024, 3, 5))
        );
        assert_eq!(parse_date(Some("2024-03-05 23:59:59")), Ok(date(2024, 3, 5)));
        assert_eq!(parse_date(Some("05/03/2024")), Ok(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(
            parse_time(Some("08:30")),
            Ok(NaiveTime::from_hms_opt(8, 30, 0))
        );
        assert_eq!(
            parse_time(Some("17:45:10.5")),
            Ok(NaiveTime::from_hms_opt(17, 45, 10))
        );
        assert_eq!(parse_time(Some("")), Ok(None));
        assert!(parse_time(Some("25:00")).is_err());
    }
}
