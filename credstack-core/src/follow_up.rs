//! Fixed-interval follow-up dates, shared by dispute tracking and recurring automations.

use chrono::{Days, NaiveDate};

use crate::error::{Result, ScheduleError};

/// Bureaus are expected to respond to a dispute within roughly two weeks.
pub const DISPUTE_FOLLOW_UP_DAYS: i64 = 14;

/// `start_date + interval_days` in calendar days.
///
/// Zero or negative intervals are rejected rather than clamped.
pub fn next_follow_up(start_date: NaiveDate, interval_days: i64) -> Result<NaiveDate> {
    if interval_days <= 0 {
        return Err(ScheduleError::InvalidInterval(interval_days));
    }
    start_date
        .checked_add_days(Days::new(interval_days as u64))
        .ok_or(ScheduleError::DateOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_dispute_interval() {
        assert_eq!(
            next_follow_up(d(2024, 1, 10), DISPUTE_FOLLOW_UP_DAYS).unwrap(),
            d(2024, 1, 24)
        );
    }

    #[test]
    fn test_crosses_month_and_year() {
        assert_eq!(next_follow_up(d(2024, 2, 20), 14).unwrap(), d(2024, 3, 5));
        assert_eq!(next_follow_up(d(2024, 12, 25), 30).unwrap(), d(2025, 1, 24));
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        assert_eq!(
            next_follow_up(d(2024, 1, 10), 0),
            Err(ScheduleError::InvalidInterval(0))
        );
        assert_eq!(
            next_follow_up(d(2024, 1, 10), -7),
            Err(ScheduleError::InvalidInterval(-7))
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            next_follow_up(NaiveDate::MAX, 1),
            Err(ScheduleError::DateOutOfRange)
        );
    }
}
