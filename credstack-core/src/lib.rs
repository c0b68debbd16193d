//! credstack-core: statement-cycle scheduling, utilization math, and
//! follow-up dates for credit reminder automation.
//!
//! Everything in this crate is a pure function of its inputs. Callers supply
//! "today"; nothing here reads a clock, touches disk, or keeps state.

pub mod account;
pub mod automation;
pub mod cycle;
pub mod dispute;
pub mod error;
pub mod follow_up;
pub mod reminders;
pub mod sweep;
pub mod time;
pub mod utilization;

pub use account::{AccountCycle, AccountKind};
pub use automation::{Automation, AutomationKind};
pub use cycle::{
    AnchorDay, ScheduledEvent, clamp_to_month, days_in_month, evaluate_due, next_occurrence,
    occurrence_after,
};
pub use dispute::{Bureau, Dispute, DisputeStatus};
pub use error::ScheduleError;
pub use follow_up::{DISPUTE_FOLLOW_UP_DAYS, next_follow_up};
pub use reminders::{
    LeadTimeConfig, ReminderIntent, ReminderKind, project_account_reminders,
    project_automation_reminder, project_dispute_reminder,
};
pub use sweep::{SweepFailure, SweepReport, advance_run_state, sweep};
pub use utilization::{
    UtilizationStatus, UtilizationThresholds, aggregate_utilization, estimate_score,
    paydown_to_target, score_transaction, utilization,
};
