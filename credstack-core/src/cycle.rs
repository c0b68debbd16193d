//! Statement-cycle scheduling: next occurrence of a day-of-month anchor and
//! whether it currently sits inside a lead-time window.
//!
//! Every function here is a pure function of its arguments. "Today" is always
//! passed in by the caller; nothing reads the system clock.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScheduleError};

/// A validated day-of-month anchor (1..=31).
///
/// Construction rejects structurally invalid days. Short months are handled
/// later, when the anchor is resolved against a concrete month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AnchorDay(u32);

impl AnchorDay {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 31;

    pub fn new(day: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&day) {
            Ok(Self(day))
        } else {
            Err(ScheduleError::InvalidAnchorDay(day))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Resolve the anchor in the given month, clamped to the month's length.
    pub fn in_month(self, year: i32, month: u32) -> Result<NaiveDate> {
        clamp_to_month(year, month, self)
    }

    /// First date on or after `reference` that lands on this anchor.
    pub fn on_or_after(self, reference: NaiveDate) -> Result<NaiveDate> {
        let candidate = self.in_month(reference.year(), reference.month())?;
        if candidate >= reference {
            return Ok(candidate);
        }
        let (year, month) = shift_month(reference.year(), reference.month(), 1)?;
        self.in_month(year, month)
    }
}

impl TryFrom<u32> for AnchorDay {
    type Error = ScheduleError;

    fn try_from(day: u32) -> Result<Self> {
        Self::new(day)
    }
}

impl From<AnchorDay> for u32 {
    fn from(anchor: AnchorDay) -> u32 {
        anchor.0
    }
}

impl fmt::Display for AnchorDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of a due-window evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Next calendar occurrence of the anchor, on or after the reference date.
    pub target_date: NaiveDate,
    /// `target_date` minus the lead time.
    pub fire_date: NaiveDate,
    /// `fire_date <= reference <= target_date`.
    pub is_due: bool,
}

impl ScheduledEvent {
    /// Whole days from `reference` until the target date (never negative
    /// for events produced by [`evaluate_due`] with the same reference).
    pub fn days_until_target(&self, reference: NaiveDate) -> i64 {
        (self.target_date - reference).num_days()
    }
}

/// Number of days in the given month, or `None` when `month` is not 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// The single clamping rule shared by statement and due-date paths:
/// an anchor past the end of the month resolves to the month's last day.
pub fn clamp_to_month(year: i32, month: u32, anchor: AnchorDay) -> Result<NaiveDate> {
    let last = days_in_month(year, month).ok_or(ScheduleError::InvalidMonth(month))?;
    NaiveDate::from_ymd_opt(year, month, anchor.get().min(last)).ok_or(ScheduleError::DateOutOfRange)
}

/// Move `(year, month)` forward by `months`, rolling the year as needed.
fn shift_month(year: i32, month: u32, months: u32) -> Result<(i32, u32)> {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).map_err(|_| ScheduleError::DateOutOfRange)?;
    let month = index.rem_euclid(12) as u32 + 1;
    Ok((year, month))
}

/// Next calendar occurrence of `anchor_day` on or after `reference_date`.
///
/// An anchor equal to today's day-of-month returns today. Anchors beyond the
/// month's length clamp to the last day (31 in February gives the 28th or 29th).
pub fn next_occurrence(reference_date: NaiveDate, anchor_day: u32) -> Result<NaiveDate> {
    AnchorDay::new(anchor_day)?.on_or_after(reference_date)
}

/// The occurrence `months_ahead` cycles after [`next_occurrence`].
///
/// Each month is clamped independently, so an anchor of 31 yields Jan 31,
/// Feb 29 (leap year) and Mar 31 rather than drifting to the 29th.
pub fn occurrence_after(
    reference_date: NaiveDate,
    anchor_day: u32,
    months_ahead: u32,
) -> Result<NaiveDate> {
    let anchor = AnchorDay::new(anchor_day)?;
    let first = anchor.on_or_after(reference_date)?;
    if months_ahead == 0 {
        return Ok(first);
    }
    let (year, month) = shift_month(first.year(), first.month(), months_ahead)?;
    anchor.in_month(year, month)
}

/// Evaluate whether the next occurrence of `anchor_day` is inside its
/// `lead_days` firing window as of `reference_date`.
pub fn evaluate_due(
    reference_date: NaiveDate,
    anchor_day: u32,
    lead_days: u32,
) -> Result<ScheduledEvent> {
    let target_date = next_occurrence(reference_date, anchor_day)?;
    let fire_date = target_date
        .checked_sub_days(Days::new(u64::from(lead_days)))
        .ok_or(ScheduleError::DateOutOfRange)?;
    let is_due = fire_date <= reference_date && reference_date <= target_date;

    Ok(ScheduledEvent {
        target_date,
        fire_date,
        is_due,
    })
}
