//! Reminder lead-time policy + projection of accounts, disputes, and
//! automations into reminder intents.
//!
//! Projection only decides *what* is due today. Queueing, dedupe storage and
//! delivery belong to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::account::AccountCycle;
use crate::automation::Automation;
use crate::cycle::{evaluate_due, ScheduledEvent};
use crate::dispute::Dispute;
use crate::error::Result;
use crate::follow_up::DISPUTE_FOLLOW_UP_DAYS;
use crate::utilization::{paydown_to_target, UtilizationThresholds};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    StatementClose,
    PaymentDue,
    DisputeFollowUp,
    Automation,
}

impl ReminderKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ReminderKind::StatementClose => "statement",
            ReminderKind::PaymentDue => "payment",
            ReminderKind::DisputeFollowUp => "dispute",
            ReminderKind::Automation => "automation",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderIntent {
    pub intent_id: String,
    /// Account name, dispute subject, or automation kind
    pub subject: String,
    pub kind: ReminderKind,
    pub title: String,
    pub body: String,
    /// First day the reminder should be delivered
    pub remind_on: NaiveDate,
    /// The date the reminder is about
    pub target_date: NaiveDate,
    pub dedupe_key: String,
}

impl ReminderIntent {
    fn new(
        subject: &str,
        kind: ReminderKind,
        title: String,
        body: String,
        remind_on: NaiveDate,
        target_date: NaiveDate,
    ) -> Self {
        let slug = slugify(subject);
        // One intent per subject per cycle: re-running the same day, or every
        // day inside the window, yields the same key.
        let dedupe_key = format!("{}:{}:{}", slug, kind.tag(), target_date);
        Self {
            intent_id: format!("ri-{}-{}-{}", slug, kind.tag(), target_date.format("%Y%m%d")),
            subject: subject.to_string(),
            kind,
            title,
            body,
            remind_on,
            target_date,
            dedupe_key,
        }
    }
}

/// Lead times and thresholds feeding reminder decisions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeadTimeConfig {
    /// Days before statement close to start nudging a paydown
    pub statement_lead_days: u32,
    /// Days before the payment due date
    pub payment_lead_days: u32,
    /// Days between dispute follow-ups
    pub dispute_follow_up_days: i64,
    pub thresholds: UtilizationThresholds,
}

impl Default for LeadTimeConfig {
    fn default() -> Self {
        Self {
            statement_lead_days: 3,
            payment_lead_days: 5,
            dispute_follow_up_days: DISPUTE_FOLLOW_UP_DAYS,
            thresholds: UtilizationThresholds::default(),
        }
    }
}

/// Deterministically project an account into the reminders due on `today`.
///
/// Statement-close and payment-due anchors are evaluated independently with
/// their own lead times; when both windows are open both intents are returned.
pub fn project_account_reminders(
    account: &AccountCycle,
    today: NaiveDate,
    policy: &LeadTimeConfig,
) -> Result<Vec<ReminderIntent>> {
    let mut out = Vec::new();

    if let Some(day) = account.statement_day {
        let ev = evaluate_due(today, day.get(), policy.statement_lead_days)?;
        if ev.is_due {
            out.push(statement_intent(account, today, ev, policy));
        }
    }

    if let Some(day) = account.due_day {
        let ev = evaluate_due(today, day.get(), policy.payment_lead_days)?;
        if ev.is_due && account.balance > 0.0 {
            out.push(payment_intent(account, today, ev));
        }
    }

    Ok(out)
}

fn statement_intent(
    account: &AccountCycle,
    today: NaiveDate,
    ev: ScheduledEvent,
    policy: &LeadTimeConfig,
) -> ReminderIntent {
    let target = policy.thresholds.target_maximum;
    let paydown = paydown_to_target(account.balance, account.credit_limit, target);
    let title = format!(
        "Alert: {} statement closes {}",
        account.name,
        in_days(ev.days_until_target(today))
    );
    let body = if paydown > 0.0 {
        format!(
            "Utilization is {:.1}%. Pay down ${:.2} before {} to report under {:.0}%.",
            account.utilization(),
            paydown,
            ev.target_date,
            target
        )
    } else {
        format!(
            "Utilization is {:.1}%, already at or under the {:.0}% target. Statement closes {}.",
            account.utilization(),
            target,
            ev.target_date
        )
    };
    ReminderIntent::new(
        &account.name,
        ReminderKind::StatementClose,
        title,
        body,
        ev.fire_date,
        ev.target_date,
    )
}

fn payment_intent(account: &AccountCycle, today: NaiveDate, ev: ScheduledEvent) -> ReminderIntent {
    let title = format!(
        "Reminder: {} payment due {}",
        account.name,
        in_days(ev.days_until_target(today))
    );
    let body = format!(
        "Balance ${:.2} is due on {}. Pay at least the minimum to avoid a late fee.",
        account.balance, ev.target_date
    );
    ReminderIntent::new(
        &account.name,
        ReminderKind::PaymentDue,
        title,
        body,
        ev.fire_date,
        ev.target_date,
    )
}

/// Follow-up reminder for an open dispute whose check-in date has arrived.
pub fn project_dispute_reminder(dispute: &Dispute, today: NaiveDate) -> Option<ReminderIntent> {
    if !dispute.follow_up_due(today) {
        return None;
    }
    let subject = dispute.subject();
    let title = format!("Follow up: dispute with {}", subject);
    let body = format!(
        "Filed {} against {}. Check the bureau response and update the status.",
        dispute.filed_on, dispute.creditor
    );
    Some(ReminderIntent::new(
        &subject,
        ReminderKind::DisputeFollowUp,
        title,
        body,
        dispute.follow_up_on,
        dispute.follow_up_on,
    ))
}

/// Reminder for an automation rule whose next run has arrived.
pub fn project_automation_reminder(
    automation: &Automation,
    today: NaiveDate,
) -> Result<Option<ReminderIntent>> {
    if !automation.is_due(today)? {
        return Ok(None);
    }
    let next_run = automation.next_run(today)?;
    let kind = automation.kind.as_str();
    let title = format!("Run automation: {}", kind.replace('_', " "));
    let body = automation
        .configuration
        .clone()
        .unwrap_or_else(|| format!("Every {} days.", automation.interval_days));
    Ok(Some(ReminderIntent::new(
        kind,
        ReminderKind::Automation,
        title,
        body,
        next_run,
        next_run,
    )))
}

fn in_days(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {} days", n),
    }
}

fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            dash = false;
        } else if !dash && !out.is_empty() {
            out.push('-');
            dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountKind;
    use crate::automation::AutomationKind;
    use crate::cycle::AnchorDay;
    use crate::dispute::Bureau;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn card(statement: u32, due: u32) -> AccountCycle {
        AccountCycle::new("Chase Freedom", AccountKind::CreditCard, 2000.0, 5000.0)
            .with_statement_day(AnchorDay::new(statement).unwrap())
            .with_due_day(AnchorDay::new(due).unwrap())
    }

    #[test]
    fn test_statement_alert_inside_window() {
        let out = project_account_reminders(&card(15, 5), d(2024, 1, 12), &LeadTimeConfig::default())
            .unwrap();
        assert_eq!(out.len(), 1);
        let ri = &out[0];
        assert_eq!(ri.kind, ReminderKind::StatementClose);
        assert_eq!(ri.target_date, d(2024, 1, 15));
        assert_eq!(ri.remind_on, d(2024, 1, 12));
        assert!(ri.title.contains("in 3 days"));
        assert!(ri.body.contains("$1500.00"), "body was {}", ri.body);
    }

    #[test]
    fn test_nothing_before_window() {
        let out = project_account_reminders(&card(15, 5), d(2024, 1, 11), &LeadTimeConfig::default())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_both_anchors_emit_independently() {
        // Statement on the 20th (lead 3), payment on the 22nd (lead 5).
        let out = project_account_reminders(&card(20, 22), d(2024, 3, 18), &LeadTimeConfig::default())
            .unwrap();
        let kinds: Vec<_> = out.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![ReminderKind::StatementClose, ReminderKind::PaymentDue]);
        assert_ne!(out[0].dedupe_key, out[1].dedupe_key);
    }

    #[test]
    fn test_account_without_anchors_is_skipped() {
        let acct = AccountCycle::new("No Date Card", AccountKind::CreditCard, 100.0, 1000.0);
        let out = project_account_reminders(&acct, d(2024, 3, 18), &LeadTimeConfig::default())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_paid_off_account_skips_payment_reminder() {
        let mut acct = card(1, 22);
        acct.balance = 0.0;
        let out = project_account_reminders(&acct, d(2024, 3, 20), &LeadTimeConfig::default())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_dedupe_key_stable_across_window() {
        let policy = LeadTimeConfig::default();
        let a = project_account_reminders(&card(15, 1), d(2024, 1, 12), &policy).unwrap();
        let b = project_account_reminders(&card(15, 1), d(2024, 1, 14), &policy).unwrap();
        assert_eq!(a[0].dedupe_key, b[0].dedupe_key);
        assert_eq!(a[0].dedupe_key, "chase-freedom:statement:2024-01-15");
        assert_eq!(a[0].intent_id, "ri-chase-freedom-statement-20240115");
    }

    #[test]
    fn test_under_target_body() {
        let mut acct = card(15, 1);
        acct.balance = 200.0;
        let out = project_account_reminders(&acct, d(2024, 1, 15), &LeadTimeConfig::default())
            .unwrap();
        assert!(out[0].title.ends_with("today"));
        assert!(out[0].body.contains("already at or under"));
    }

    #[test]
    fn test_dispute_reminder() {
        let dispute = Dispute::file(Bureau::Experian, "Chase Bank", d(2024, 1, 10), 14).unwrap();
        assert!(project_dispute_reminder(&dispute, d(2024, 1, 20)).is_none());
        let ri = project_dispute_reminder(&dispute, d(2024, 1, 24)).unwrap();
        assert_eq!(ri.kind, ReminderKind::DisputeFollowUp);
        assert_eq!(ri.target_date, d(2024, 1, 24));
        assert_eq!(ri.dedupe_key, "chase-bank-experian:dispute:2024-01-24");
    }

    #[test]
    fn test_automation_reminder() {
        let rule = Automation::new(AutomationKind::WeeklyScan).with_last_run(d(2024, 5, 3));
        assert!(project_automation_reminder(&rule, d(2024, 5, 9)).unwrap().is_none());
        let ri = project_automation_reminder(&rule, d(2024, 5, 10)).unwrap().unwrap();
        assert_eq!(ri.title, "Run automation: weekly scan");
        assert_eq!(ri.body, "Every 7 days.");
    }

    #[test]
    fn test_policy_defaults() {
        let p = LeadTimeConfig::default();
        assert_eq!(p.statement_lead_days, 3);
        assert_eq!(p.thresholds.target_maximum, 10.0);
        assert_eq!(p.dispute_follow_up_days, 14);
    }
}
