//! Creation-time validation of booking input.
//!
//! Pure helpers: the current date is passed in so policy is testable
//! without a clock. The orchestration (artist existence, availability,
//! duplicate checks) lives in `artisthub-booking`, which calls these in
//! the documented order.

use crate::error::DomainError;
use chrono::{NaiveDate, NaiveTime};

/// Wire format for event dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for event times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a date as `YYYY-MM-DD`, with no policy check.
///
/// Booking edits use this directly; the future-date policy applies only
/// at creation.
///
/// # Errors
///
/// [`DomainError::InvalidDate`] when the text does not parse.
pub fn parse_date(text: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(text.to_string()))
}

/// Parse an event date and enforce the strictly-in-the-future policy.
///
/// The date must be strictly after `today`; a booking for today is already
/// too late to arrange. The policy applies at creation only and is never
/// re-validated on later reads or edits.
///
/// # Errors
///
/// [`DomainError::InvalidDate`] when the text does not parse as
/// `YYYY-MM-DD`, [`DomainError::PastDate`] when it is today or earlier.
pub fn parse_event_date(text: &str, today: NaiveDate) -> Result<NaiveDate, DomainError> {
    let date = parse_date(text)?;
    if date <= today {
        return Err(DomainError::PastDate(date));
    }
    Ok(date)
}

/// Parse an event time as `HH:MM`.
///
/// # Errors
///
/// [`DomainError::InvalidTime`] when the text does not parse.
pub fn parse_event_time(text: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|_| DomainError::InvalidTime(text.to_string()))
}

/// Whether `budget` satisfies an artist's minimum price.
///
/// `None` means the artist declares no minimum and every budget passes.
/// Comparison is in the artist's currency; the budget is taken at face
/// value (no conversion in this core).
#[must_use]
pub fn meets_minimum_price(budget: f64, min_price: Option<f64>) -> bool {
    min_price.is_none_or(|min| budget >= min)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_must_be_strictly_future() {
        let today = day(2025, 6, 1);
        assert!(matches!(
            parse_event_date("2025-06-01", today),
            Err(DomainError::PastDate(_))
        ));
        assert!(matches!(
            parse_event_date("2025-05-31", today),
            Err(DomainError::PastDate(_))
        ));
        assert_eq!(
            parse_event_date("2025-06-02", today).unwrap(),
            day(2025, 6, 2)
        );
    }

    #[test]
    fn malformed_date_is_invalid_not_past() {
        let today = day(2025, 6, 1);
        for text in ["06/02/2025", "2025-13-01", "tomorrow", ""] {
            assert!(
                matches!(parse_event_date(text, today), Err(DomainError::InvalidDate(_))),
                "{text:?} should be InvalidDate"
            );
        }
    }

    #[test]
    fn time_parses_hour_minute_only() {
        assert_eq!(
            parse_event_time("18:30").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap()
        );
        assert_eq!(
            parse_event_time("00:00").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        for text in ["25:00", "18:60", "6pm", "18:30:15", ""] {
            assert!(
                matches!(parse_event_time(text), Err(DomainError::InvalidTime(_))),
                "{text:?} should be InvalidTime"
            );
        }
    }

    #[test]
    fn minimum_price_boundary_is_inclusive() {
        assert!(!meets_minimum_price(499.99, Some(500.0)));
        assert!(meets_minimum_price(500.0, Some(500.0)));
        assert!(meets_minimum_price(500.01, Some(500.0)));
        assert!(meets_minimum_price(0.0, None));
    }
}
