//! Validation errors raised by the scheduling engine.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Day-of-month anchor outside 1..=31.
    #[error("invalid anchor day {0}: must be between 1 and 31")]
    InvalidAnchorDay(u32),

    /// Follow-up interval that is zero or negative.
    #[error("invalid interval of {0} days: must be positive")]
    InvalidInterval(i64),

    /// Calendar month outside 1..=12.
    #[error("invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    /// Result would fall outside the calendar range chrono can represent.
    #[error("date out of representable range")]
    DateOutOfRange,
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
