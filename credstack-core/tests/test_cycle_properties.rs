use chrono::{Datelike, Days, NaiveDate};
use credstack_core::{
    AccountCycle, AccountKind, AnchorDay, Bureau, Dispute, LeadTimeConfig, ReminderKind,
    ScheduleError, evaluate_due, next_follow_up, next_occurrence, occurrence_after,
    project_account_reminders, utilization,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Every day from 2023-01-01 through 2025-12-31.
fn every_day() -> impl Iterator<Item = NaiveDate> {
    let start = d(2023, 1, 1);
    (0..1096u64).map(move |i| start.checked_add_days(Days::new(i)).unwrap())
}

#[test]
fn test_next_occurrence_never_before_reference() {
    for day in every_day() {
        for anchor in 1..=31 {
            let next = next_occurrence(day, anchor).unwrap();
            assert!(next >= day, "{day} anchor {anchor} -> {next}");
            // Never more than one month out.
            assert!((next - day).num_days() <= 31, "{day} anchor {anchor} -> {next}");
        }
    }
}

#[test]
fn test_anchor_equal_to_reference_day() {
    for day in every_day() {
        assert_eq!(next_occurrence(day, day.day()).unwrap(), day);
    }
}

#[test]
fn test_month_length_clamping() {
    assert_eq!(next_occurrence(d(2024, 2, 1), 31).unwrap(), d(2024, 2, 29));
    assert_eq!(next_occurrence(d(2023, 2, 1), 31).unwrap(), d(2023, 2, 28));
    assert_eq!(next_occurrence(d(2024, 12, 20), 15).unwrap(), d(2025, 1, 15));
}

#[test]
fn test_statement_window() {
    let ev = evaluate_due(d(2024, 1, 12), 15, 3).unwrap();
    assert_eq!(ev.target_date, d(2024, 1, 15));
    assert_eq!(ev.fire_date, d(2024, 1, 12));
    assert!(ev.is_due);

    assert!(!evaluate_due(d(2024, 1, 11), 15, 3).unwrap().is_due);
    assert_eq!(evaluate_due(d(2024, 1, 12), 15, 3), evaluate_due(d(2024, 1, 12), 15, 3));
}

#[test]
fn test_window_is_exactly_lead_plus_one_days_per_cycle() {
    // Anchor 20 with lead 4: due on the 16th through the 20th of each month.
    let due_days = every_day()
        .filter(|&day| evaluate_due(day, 20, 4).unwrap().is_due)
        .count();
    assert_eq!(due_days, 36 * 5);
}

#[test]
fn test_utilization_and_follow_up() {
    assert_eq!(utilization(1000.0, 0.0), 0.0);
    assert_eq!(utilization(500.0, 5000.0), 10.0);
    assert_eq!(next_follow_up(d(2024, 1, 10), 14).unwrap(), d(2024, 1, 24));
}

#[test]
fn test_invalid_anchor_days() {
    assert_eq!(
        next_occurrence(d(2024, 1, 1), 0),
        Err(ScheduleError::InvalidAnchorDay(0))
    );
    assert_eq!(
        next_occurrence(d(2024, 1, 1), 32),
        Err(ScheduleError::InvalidAnchorDay(32))
    );
}

#[test]
fn test_occurrence_after_reclamps_each_month() {
    assert_eq!(occurrence_after(d(2024, 1, 31), 31, 1).unwrap(), d(2024, 2, 29));
    assert_eq!(occurrence_after(d(2024, 1, 31), 31, 2).unwrap(), d(2024, 3, 31));
    assert_eq!(occurrence_after(d(2024, 11, 30), 30, 3).unwrap(), d(2025, 2, 28));
}

#[test]
fn test_statement_and_due_reminders_both_emitted() {
    // Statement closes the 15th, payment due the 17th: both windows open on the 13th.
    let account = AccountCycle::new("Discover It", AccountKind::CreditCard, 2400.0, 6000.0)
        .with_statement_day(AnchorDay::new(15).unwrap())
        .with_due_day(AnchorDay::new(17).unwrap());

    let intents =
        project_account_reminders(&account, d(2024, 5, 13), &LeadTimeConfig::default()).unwrap();
    let kinds: Vec<_> = intents.iter().map(|i| i.kind).collect();
    assert_eq!(kinds, vec![ReminderKind::StatementClose, ReminderKind::PaymentDue]);
    assert_ne!(intents[0].dedupe_key, intents[1].dedupe_key);
}

#[test]
fn test_dispute_follow_up_due_on_fourteenth_day() {
    let dispute = Dispute::file(Bureau::Experian, "Capital One", d(2024, 1, 10), 14).unwrap();
    assert_eq!(dispute.follow_up_on, d(2024, 1, 24));
    assert!(!dispute.follow_up_due(d(2024, 1, 23)));
    assert!(dispute.follow_up_due(d(2024, 1, 24)));
}
