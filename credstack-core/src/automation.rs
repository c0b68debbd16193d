//! Recurring automation rules (monthly reports, weekly scans, ...) and when they next run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::follow_up::next_follow_up;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AutomationKind {
    AutopayReminder,
    StatementAlert,
    MonthlyReport,
    WeeklyScan,
    DisputeTracker,
    CreditBuilder,
    InquiryAlert,
    MonthlyTask,
}

impl AutomationKind {
    pub const ALL: [AutomationKind; 8] = [
        AutomationKind::AutopayReminder,
        AutomationKind::StatementAlert,
        AutomationKind::MonthlyReport,
        AutomationKind::WeeklyScan,
        AutomationKind::DisputeTracker,
        AutomationKind::CreditBuilder,
        AutomationKind::InquiryAlert,
        AutomationKind::MonthlyTask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationKind::AutopayReminder => "autopay_reminder",
            AutomationKind::StatementAlert => "statement_alert",
            AutomationKind::MonthlyReport => "monthly_report",
            AutomationKind::WeeklyScan => "weekly_scan",
            AutomationKind::DisputeTracker => "dispute_tracker",
            AutomationKind::CreditBuilder => "credit_builder",
            AutomationKind::InquiryAlert => "inquiry_alert",
            AutomationKind::MonthlyTask => "monthly_task",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Interval used when a rule's configuration does not name one.
    pub fn default_interval_days(&self) -> i64 {
        match self {
            AutomationKind::WeeklyScan => 7,
            AutomationKind::DisputeTracker => 14,
            _ => 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Automation {
    pub kind: AutomationKind,
    pub active: bool,
    pub interval_days: i64,
    pub last_run: Option<NaiveDate>,
    /// Free-text description kept for display
    pub configuration: Option<String>,
}

impl Automation {
    pub fn new(kind: AutomationKind) -> Self {
        Self {
            kind,
            active: true,
            interval_days: kind.default_interval_days(),
            last_run: None,
            configuration: None,
        }
    }

    pub fn with_interval(mut self, interval_days: i64) -> Self {
        self.interval_days = interval_days;
        self
    }

    pub fn with_last_run(mut self, last_run: NaiveDate) -> Self {
        self.last_run = Some(last_run);
        self
    }

    /// A rule that never ran is due immediately.
    pub fn next_run(&self, today: NaiveDate) -> Result<NaiveDate> {
        match self.last_run {
            None => Ok(today),
            Some(last) => next_follow_up(last, self.interval_days),
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> Result<bool> {
        if !self.active {
            return Ok(false);
        }
        Ok(self.next_run(today)? <= today)
    }

    pub fn mark_run(&mut self, today: NaiveDate) {
        self.last_run = Some(today);
    }
}
