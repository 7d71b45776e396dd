//! Appointment field validation.
//!
//! Fail-fast with typed errors: the first violated rule is reported and no
//! further checks run. Each variant carries a fixed user-facing message;
//! the caller surfaces it and must not persist the record.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::Appointment;

/// Combined "DD/MM/YYYY HH:MM" format used by the postpone comparison.
const COMBINED_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Accepted year range for appointment dates.
const MIN_YEAR: i32 = 1875;
const MAX_YEAR: i32 = 2125;

/// Validation errors, one fixed message per rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Location cannot be empty")]
    BlankLocation,

    #[error("Date must be in DD/MM/YYYY format")]
    BadDateFormat,

    #[error("Date values are out of range")]
    DateOutOfRange,

    #[error("Date does not exist on the calendar")]
    InvalidCalendarDate,

    #[error("Time must be in HH:MM format")]
    BadTimeFormat,

    #[error("Time values are out of range")]
    TimeOutOfRange,

    #[error("New date and time must be after the current ones")]
    NotAfterOriginal,

    #[error("Could not compare the appointment dates")]
    CombinedParseFailure,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a "DD/MM/YYYY" date string into a calendar date.
///
/// Checks run in order: shape, field ranges, then strict calendar
/// existence. 31/02/2024 passes the first two and fails the third; there
/// is no lenient rollover into March.
pub fn validate_date(text: &str) -> ValidationResult<NaiveDate> {
    if !matches_date_shape(text) {
        return Err(ValidationError::BadDateFormat);
    }

    // Shape guarantees these slices are pure ASCII digits.
    let day: u32 = text[0..2].parse().map_err(|_| ValidationError::BadDateFormat)?;
    let month: u32 = text[3..5].parse().map_err(|_| ValidationError::BadDateFormat)?;
    let year: i32 = text[6..10].parse().map_err(|_| ValidationError::BadDateFormat)?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ValidationError::DateOutOfRange);
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or(ValidationError::InvalidCalendarDate)
}

/// Validate an "HH:MM" time string.
///
/// Rejects anything that is not exactly two digits, a colon, two digits
/// ("9:30" fails the shape check), then range-checks hour and minute.
pub fn validate_time(text: &str) -> ValidationResult<()> {
    if !matches_time_shape(text) {
        return Err(ValidationError::BadTimeFormat);
    }

    let hour: u32 = text[0..2].parse().map_err(|_| ValidationError::BadTimeFormat)?;
    let minute: u32 = text[3..5].parse().map_err(|_| ValidationError::BadTimeFormat)?;

    if hour > 23 || minute > 59 {
        return Err(ValidationError::TimeOutOfRange);
    }
    Ok(())
}

/// Validate the three required appointment fields.
///
/// Location is checked first so its error takes priority, then date, then
/// time; the first failure short-circuits.
pub fn validate_required_fields(date: &str, time: &str, location: &str) -> ValidationResult<()> {
    if location.trim().is_empty() {
        return Err(ValidationError::BlankLocation);
    }
    validate_date(date)?;
    validate_time(time)?;
    Ok(())
}

/// Check that a proposed reschedule lands strictly after the original.
///
/// Both sides are recombined through the same "DD/MM/YYYY HH:MM" format
/// before comparison. A parse failure here is an internal comparison
/// error, distinct from the field-level validators the caller already ran.
pub fn validate_postpone(
    original: &Appointment,
    new_date: &str,
    new_time: &str,
) -> ValidationResult<()> {
    let original_combined = format!("{} {}", original.date_string(), original.time);
    let new_combined = format!("{} {}", new_date, new_time);

    let original_instant = parse_combined(&original_combined)?;
    let new_instant = parse_combined(&new_combined)?;

    if new_instant > original_instant {
        Ok(())
    } else {
        Err(ValidationError::NotAfterOriginal)
    }
}

/// Parse a combined "DD/MM/YYYY HH:MM" string.
pub(crate) fn parse_combined(text: &str) -> ValidationResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, COMBINED_FORMAT)
        .map_err(|_| ValidationError::CombinedParseFailure)
}

fn matches_date_shape(text: &str) -> bool {
    let b = text.as_bytes();
    b.len() == 10
        && b[2] == b'/'
        && b[5] == b'/'
        && [0, 1, 3, 4, 6, 7, 8, 9]
            .iter()
            .all(|&i| b[i].is_ascii_digit())
}

fn matches_time_shape(text: &str) -> bool {
    let b = text.as_bytes();
    b.len() == 5 && b[2] == b':' && [0, 1, 3, 4].iter().all(|&i| b[i].is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn appt(date: &str, time: &str) -> Appointment {
        let instant = parse_combined(&format!("{} {}", date, time)).unwrap();
        Appointment::new(instant, time.into(), "Clinic".into(), String::new())
    }

    #[test]
    fn test_validate_date_ok() {
        let date = validate_date("14/03/2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());

        // Leap day on a leap year is a real date.
        assert!(validate_date("29/02/2024").is_ok());
    }

    #[test]
    fn test_validate_date_bad_format() {
        for bad in ["", "2025-03-14", "1/03/2025", "14/3/2025", "14/03/25", "aa/bb/cccc"] {
            assert_eq!(validate_date(bad), Err(ValidationError::BadDateFormat));
        }
    }

    #[test]
    fn test_validate_date_out_of_range() {
        // Day above 31 trips the range check, not the calendar parse.
        assert_eq!(validate_date("32/01/2024"), Err(ValidationError::DateOutOfRange));
        assert_eq!(validate_date("00/01/2024"), Err(ValidationError::DateOutOfRange));
        assert_eq!(validate_date("01/13/2024"), Err(ValidationError::DateOutOfRange));
        assert_eq!(validate_date("01/01/1874"), Err(ValidationError::DateOutOfRange));
        assert_eq!(validate_date("01/01/2126"), Err(ValidationError::DateOutOfRange));
    }

    #[test]
    fn test_validate_date_invalid_calendar() {
        // Passes shape and range, fails strict calendar existence.
        assert_eq!(validate_date("31/02/2024"), Err(ValidationError::InvalidCalendarDate));
        assert_eq!(validate_date("29/02/2023"), Err(ValidationError::InvalidCalendarDate));
        assert_eq!(validate_date("31/04/2025"), Err(ValidationError::InvalidCalendarDate));
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("00:00").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("09:30").is_ok());

        assert_eq!(validate_time("24:00"), Err(ValidationError::TimeOutOfRange));
        assert_eq!(validate_time("12:60"), Err(ValidationError::TimeOutOfRange));

        // Missing leading zero fails the shape check, not the range check.
        assert_eq!(validate_time("9:30"), Err(ValidationError::BadTimeFormat));
        assert_eq!(validate_time(""), Err(ValidationError::BadTimeFormat));
        assert_eq!(validate_time("09.30"), Err(ValidationError::BadTimeFormat));
    }

    #[test]
    fn test_required_fields_priority() {
        // Blank location wins even when date and time are also invalid.
        assert_eq!(
            validate_required_fields("bad", "bad", "   "),
            Err(ValidationError::BlankLocation)
        );
        // Then date is reported before time.
        assert_eq!(
            validate_required_fields("bad", "bad", "Clinic"),
            Err(ValidationError::BadDateFormat)
        );
        assert_eq!(
            validate_required_fields("14/03/2025", "bad", "Clinic"),
            Err(ValidationError::BadTimeFormat)
        );
        assert!(validate_required_fields("14/03/2025", "10:00", "Clinic").is_ok());
    }

    #[test]
    fn test_postpone_same_day_earlier_time_rejected() {
        let original = appt("01/01/2025", "10:00");
        assert_eq!(
            validate_postpone(&original, "01/01/2025", "09:00"),
            Err(ValidationError::NotAfterOriginal)
        );
        // Equal instant is also rejected; "postpone" means strictly later.
        assert_eq!(
            validate_postpone(&original, "01/01/2025", "10:00"),
            Err(ValidationError::NotAfterOriginal)
        );
    }

    #[test]
    fn test_postpone_later_day_wins_regardless_of_time() {
        let original = appt("01/01/2025", "10:00");
        assert!(validate_postpone(&original, "02/01/2025", "09:00").is_ok());
        assert!(validate_postpone(&original, "01/01/2025", "10:01").is_ok());
    }

    #[test]
    fn test_postpone_combined_parse_failure() {
        let original = appt("01/01/2025", "10:00");
        assert_eq!(
            validate_postpone(&original, "02-01-2025", "09:00"),
            Err(ValidationError::CombinedParseFailure)
        );
    }
}
