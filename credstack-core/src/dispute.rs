//! Credit-report dispute tracking: who it was filed with and when to check back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::follow_up::next_follow_up;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Bureau {
    Experian,
    Equifax,
    TransUnion,
}

impl Bureau {
    pub const ALL: [Bureau; 3] = [Bureau::Experian, Bureau::Equifax, Bureau::TransUnion];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "experian" => Some(Bureau::Experian),
            "equifax" => Some(Bureau::Equifax),
            "transunion" | "trans union" => Some(Bureau::TransUnion),
            _ => None,
        }
    }
}

impl fmt::Display for Bureau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bureau::Experian => "Experian",
            Bureau::Equifax => "Equifax",
            Bureau::TransUnion => "TransUnion",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DisputeStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "rejected")]
    Rejected,
}

impl DisputeStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pending" => Some(DisputeStatus::Pending),
            "in_progress" | "in progress" => Some(DisputeStatus::InProgress),
            "resolved" => Some(DisputeStatus::Resolved),
            "rejected" => Some(DisputeStatus::Rejected),
            _ => None,
        }
    }

    /// Still waiting on the bureau.
    pub fn is_open(&self) -> bool {
        matches!(self, DisputeStatus::Pending | DisputeStatus::InProgress)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dispute {
    pub bureau: Bureau,
    pub creditor: String,
    pub account_name: Option<String>,
    pub filed_on: NaiveDate,
    pub follow_up_on: NaiveDate,
    pub status: DisputeStatus,
}

impl Dispute {
    /// Open a new dispute; the first follow-up lands `interval_days` after filing.
    pub fn file(
        bureau: Bureau,
        creditor: impl Into<String>,
        filed_on: NaiveDate,
        interval_days: i64,
    ) -> Result<Self> {
        Ok(Self {
            bureau,
            creditor: creditor.into(),
            account_name: None,
            filed_on,
            follow_up_on: next_follow_up(filed_on, interval_days)?,
            status: DisputeStatus::Pending,
        })
    }

    pub fn with_account(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    pub fn with_status(mut self, status: DisputeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn follow_up_due(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.follow_up_on <= today
    }

    /// Push the next check `interval_days` past `today` after a follow-up is handled.
    pub fn reschedule(&mut self, today: NaiveDate, interval_days: i64) -> Result<()> {
        self.follow_up_on = next_follow_up(today, interval_days)?;
        Ok(())
    }

    /// Human label for reminders: account name when known, otherwise the creditor.
    pub fn subject(&self) -> String {
        match &self.account_name {
            Some(name) => format!("{} ({})", name, self.bureau),
            None => format!("{} ({})", self.creditor, self.bureau),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::follow_up::DISPUTE_FOLLOW_UP_DAYS;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_file_sets_follow_up() {
        let dispute =
            Dispute::file(Bureau::Experian, "Chase Bank", d(2024, 1, 10), DISPUTE_FOLLOW_UP_DAYS)
                .unwrap();
        assert_eq!(dispute.follow_up_on, d(2024, 1, 24));
        assert_eq!(dispute.status, DisputeStatus::Pending);
        assert!(!dispute.follow_up_due(d(2024, 1, 23)));
        assert!(dispute.follow_up_due(d(2024, 1, 24)));
        assert!(dispute.follow_up_due(d(2024, 2, 1)));
    }

    #[test]
    fn test_closed_dispute_never_due() {
        let dispute = Dispute::file(Bureau::Equifax, "Citi", d(2024, 1, 10), 14)
            .unwrap()
            .with_status(DisputeStatus::Resolved);
        assert!(!dispute.follow_up_due(d(2024, 3, 1)));
    }

    #[test]
    fn test_reschedule() {
        let mut dispute = Dispute::file(Bureau::TransUnion, "Amex", d(2024, 1, 10), 14).unwrap();
        dispute.reschedule(d(2024, 1, 24), 14).unwrap();
        assert_eq!(dispute.follow_up_on, d(2024, 2, 7));
        assert_eq!(
            dispute.reschedule(d(2024, 1, 24), 0),
            Err(ScheduleError::InvalidInterval(0))
        );
    }

    #[test]
    fn test_bureau_parse() {
        assert_eq!(Bureau::parse("Experian"), Some(Bureau::Experian));
        assert_eq!(Bureau::parse(" transunion "), Some(Bureau::TransUnion));
        assert_eq!(Bureau::parse("Innovis"), None);
        assert_eq!(Bureau::TransUnion.to_string(), "TransUnion");
    }

    #[test]
    fn test_subject_prefers_account_name() {
        let dispute = Dispute::file(Bureau::Experian, "Chase Bank", d(2024, 1, 10), 14)
            .unwrap()
            .with_account("Chase Freedom");
        assert_eq!(dispute.subject(), "Chase Freedom (Experian)");
    }
}
