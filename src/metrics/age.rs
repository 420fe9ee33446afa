//! Birthdate parsing and age derivation.
//!
//! Birthdates are entered as `DD/MM/YYYY`.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

/// Earliest accepted birth year.
pub const MIN_BIRTH_YEAR: i32 = 1900;

static BIRTHDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("BIRTHDATE regex is valid"));

/// Error type for birthdate validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeError {
    /// Input is not shaped like `DD/MM/YYYY`.
    #[error("Invalid birthdate format '{0}': expected DD/MM/YYYY")]
    Format(String),
    /// Day or month is out of range, or the date does not exist.
    #[error("Invalid birthdate '{0}': no such date")]
    NoSuchDate(String),
    /// Year is before 1900 or after the current year.
    #[error("Invalid birth year {year}: expected {min}..={max}")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// Lowest accepted year.
        min: i32,
        /// Highest accepted year.
        max: i32,
    },
}

/// Parse and validate a `DD/MM/YYYY` birthdate against the current year.
pub fn validate_birthdate(input: &str) -> Result<NaiveDate, AgeError> {
    validate_birthdate_in(input, Local::now().year())
}

/// Parse and validate a birthdate, accepting years up to `current_year`.
pub fn validate_birthdate_in(input: &str, current_year: i32) -> Result<NaiveDate, AgeError> {
    let input = input.trim();
    let caps = BIRTHDATE
        .captures(input)
        .ok_or_else(|| AgeError::Format(input.to_string()))?;

    // The regex guarantees all three groups are ASCII digits.
    let day: u32 = caps[1].parse().map_err(|_| AgeError::Format(input.to_string()))?;
    let month: u32 = caps[2].parse().map_err(|_| AgeError::Format(input.to_string()))?;
    let year: i32 = caps[3].parse().map_err(|_| AgeError::Format(input.to_string()))?;

    if !(MIN_BIRTH_YEAR..=current_year).contains(&year) {
        return Err(AgeError::YearOutOfRange {
            year,
            min: MIN_BIRTH_YEAR,
            max: current_year,
        });
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| AgeError::NoSuchDate(input.to_string()))
}

/// Completed years between `birthdate` and `today`.
///
/// Returns 0 when the birthdate lies in the future.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    if today < birthdate {
        return 0;
    }
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Age in completed years as of the local date.
pub fn age_today(birthdate: NaiveDate) -> u32 {
    age_on(birthdate, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_birthdate_ok() {
        assert_eq!(
            validate_birthdate_in("15/06/1994", 2024).unwrap(),
            date(1994, 6, 15)
        );
    }

    #[test]
    fn test_validate_birthdate_trims_whitespace() {
        assert!(validate_birthdate_in("  01/01/2000 ", 2024).is_ok());
    }

    #[test]
    fn test_validate_birthdate_requires_padding() {
        assert!(matches!(
            validate_birthdate_in("1/6/1994", 2024),
            Err(AgeError::Format(_))
        ));
        assert!(matches!(
            validate_birthdate_in("1994-06-15", 2024),
            Err(AgeError::Format(_))
        ));
    }

    #[test]
    fn test_validate_birthdate_rejects_impossible_dates() {
        assert!(matches!(
            validate_birthdate_in("31/02/2000", 2024),
            Err(AgeError::NoSuchDate(_))
        ));
        assert!(matches!(
            validate_birthdate_in("00/01/2000", 2024),
            Err(AgeError::NoSuchDate(_))
        ));
        assert!(matches!(
            validate_birthdate_in("10/13/2000", 2024),
            Err(AgeError::NoSuchDate(_))
        ));
    }

    #[test]
    fn test_validate_birthdate_year_bounds() {
        assert!(validate_birthdate_in("01/01/1900", 2024).is_ok());
        assert_eq!(
            validate_birthdate_in("31/12/1899", 2024),
            Err(AgeError::YearOutOfRange {
                year: 1899,
                min: 1900,
                max: 2024
            })
        );
        assert!(validate_birthdate_in("01/01/2025", 2024).is_err());
    }

    #[test]
    fn test_age_on_before_and_after_birthday() {
        let born = date(1994, 6, 15);
        assert_eq!(age_on(born, date(2024, 6, 14)), 29);
        assert_eq!(age_on(born, date(2024, 6, 15)), 30);
        assert_eq!(age_on(born, date(2024, 12, 31)), 30);
    }

    #[test]
    fn test_age_on_leap_day() {
        let born = date(2000, 2, 29);
        assert_eq!(age_on(born, date(2001, 2, 28)), 0);
        assert_eq!(age_on(born, date(2001, 3, 1)), 1);
    }

    #[test]
    fn test_age_on_future_birthdate_is_zero() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }
}
