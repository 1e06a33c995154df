//! # Dates
//!
//! Birth date parsing and age computation.
//!
//! ## Age Rule
//! ```text
//! age = floor((today - birth_date).days / 365)
//! ```
//! Leap days are not counted, so the age ticks over a few days before the
//! actual birthday once enough leap years have passed.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::{BIRTH_DATE_FORMAT, DAYS_PER_YEAR};

/// Parses a `dd/mm/yyyy` birth date.
///
/// ## Example
/// ```rust
/// use drogaria_core::dates::parse_birth_date;
///
/// assert!(parse_birth_date("29/02/1952").is_ok());
/// assert!(parse_birth_date("31/02/1952").is_err());
/// assert!(parse_birth_date("1952-02-29").is_err());
/// ```
pub fn parse_birth_date(text: &str) -> CoreResult<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, BIRTH_DATE_FORMAT).map_err(|_| CoreError::DateParse {
        input: text.to_string(),
    })
}

/// Whole years elapsed between `birth_date` and `today`.
///
/// Floor division, so a birth date in the future yields a negative age
/// rather than zero.
pub fn age_in_years(birth_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - birth_date).num_days().div_euclid(DAYS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(parse_birth_date("05/01/1990").unwrap(), date(1990, 1, 5));
        assert_eq!(parse_birth_date(" 5/1/1990 ").unwrap(), date(1990, 1, 5));
        assert!(parse_birth_date("").is_err());
        assert!(parse_birth_date("13/13/1990").is_err());
    }

    #[test]
    fn test_age_counts_365_day_years() {
        // 364 days
        assert_eq!(age_in_years(date(2001, 1, 1), date(2001, 12, 31)), 0);
        assert_eq!(age_in_years(date(2001, 1, 1), date(2002, 1, 1)), 1);
        // 365 days inside a leap year already counts as one
        assert_eq!(age_in_years(date(2000, 1, 1), date(2000, 12, 31)), 1);
        assert_eq!(age_in_years(date(1990, 6, 15), date(1990, 6, 15)), 0);
    }

    #[test]
    fn test_age_drifts_ahead_of_birthday_over_leap_years() {
        // 66 * 365 = 24090 days; 17 leap days fall in between,
        // so the count reaches 66 about 17 days before the birthday.
        let birth = date(1960, 3, 20);
        assert_eq!(age_in_years(birth, date(2026, 3, 5)), 66);
        assert_eq!(age_in_years(birth, date(2026, 2, 1)), 65);
    }

    #[test]
    fn test_future_birth_date_is_negative() {
        assert_eq!(age_in_years(date(2030, 1, 1), date(2029, 12, 31)), -1);
    }
}
