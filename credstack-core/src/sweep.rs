//! One evaluation tick over every account, dispute, and automation.
//!
//! The sweep holds no state between calls; the caller owns the cadence
//! (daily job, `watch` loop) and persists what [`advance_run_state`] changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::account::AccountCycle;
use crate::automation::Automation;
use crate::dispute::Dispute;
use crate::error::{Result, ScheduleError};
use crate::reminders::{
    LeadTimeConfig, ReminderIntent, project_account_reminders, project_automation_reminder,
    project_dispute_reminder,
};

/// An input that could not be evaluated; the rest of the sweep still runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepFailure {
    pub subject: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SweepReport {
    pub intents: Vec<ReminderIntent>,
    pub accounts_scanned: usize,
    /// Accounts with neither a statement nor a due day
    pub accounts_without_cycle: usize,
    pub failures: Vec<SweepFailure>,
}

impl SweepReport {
    fn fail(&mut self, subject: &str, err: ScheduleError) {
        warn!(subject, error = %err, "skipping input in sweep");
        self.failures.push(SweepFailure {
            subject: subject.to_string(),
            error: err.to_string(),
        });
    }
}

/// Evaluate everything once as of `today`.
pub fn sweep(
    accounts: &[AccountCycle],
    disputes: &[Dispute],
    automations: &[Automation],
    today: NaiveDate,
    policy: &LeadTimeConfig,
) -> SweepReport {
    let mut report = SweepReport::default();

    for account in accounts {
        report.accounts_scanned += 1;
        if account.statement_day.is_none() && account.due_day.is_none() {
            report.accounts_without_cycle += 1;
            continue;
        }
        match project_account_reminders(account, today, policy) {
            Ok(intents) => {
                debug!(account = %account.name, due = intents.len(), "evaluated account");
                report.intents.extend(intents);
            }
            Err(e) => report.fail(&account.name, e),
        }
    }

    report
        .intents
        .extend(disputes.iter().filter_map(|d| project_dispute_reminder(d, today)));

    for automation in automations {
        match project_automation_reminder(automation, today) {
            Ok(Some(intent)) => report.intents.push(intent),
            Ok(None) => {}
            Err(e) => report.fail(automation.kind.as_str(), e),
        }
    }

    report.intents.sort_by(|a, b| {
        a.target_date
            .cmp(&b.target_date)
            .then_with(|| a.dedupe_key.cmp(&b.dedupe_key))
    });

    debug!(
        %today,
        intents = report.intents.len(),
        failures = report.failures.len(),
        "sweep complete"
    );
    report
}

/// Record that everything the sweep fired on `today` has run: due automations
/// get `last_run = today`, due disputes move to their next follow-up date.
/// Without this a rule never leaves its firing window. Returns how many
/// inputs advanced.
pub fn advance_run_state(
    automations: &mut [Automation],
    disputes: &mut [Dispute],
    today: NaiveDate,
    policy: &LeadTimeConfig,
) -> Result<usize> {
    let mut advanced = 0usize;

    for automation in automations.iter_mut() {
        // Rules that failed evaluation were already reported by the sweep.
        if automation.is_due(today).unwrap_or(false) {
            automation.mark_run(today);
            advanced += 1;
        }
    }

    for dispute in disputes.iter_mut() {
        if dispute.follow_up_due(today) {
            dispute.reschedule(today, policy.dispute_follow_up_days)?;
            advanced += 1;
        }
    }

    Ok(advanced)
}
