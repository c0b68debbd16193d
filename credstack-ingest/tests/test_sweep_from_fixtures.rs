use chrono::NaiveDate;
use credstack_core::{
    LeadTimeConfig, ReminderKind, UtilizationStatus, aggregate_utilization, sweep,
};
use credstack_ingest::{
    parse_accounts_csv, parse_automations_csv, parse_disputes_csv, statement_lead_override,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_load_fixture_accounts() {
    let accounts = parse_accounts_csv(fixture("accounts.csv")).unwrap();
    assert_eq!(accounts.len(), 5);

    let total = aggregate_utilization(&accounts);
    assert!((total - 2090.0 / 105.0).abs() < 1e-9, "got {total}");
    assert_eq!(
        UtilizationStatus::classify(total, LeadTimeConfig::default().thresholds),
        UtilizationStatus::Elevated
    );
}

/// Full tick over the fixture files with the statement lead taken from the
/// `statement_alert` rule's free-text configuration.
#[test]
fn test_sweep_over_fixtures() {
    let accounts = parse_accounts_csv(fixture("accounts.csv")).unwrap();
    let disputes = parse_disputes_csv(fixture("disputes.csv"), 14).unwrap();
    let automations = parse_automations_csv(fixture("automations.csv")).unwrap();

    let mut policy = LeadTimeConfig::default();
    policy.statement_lead_days = statement_lead_override(&automations).unwrap();
    assert_eq!(policy.statement_lead_days, 4);

    let report = sweep(&accounts, &disputes, &automations, d(2024, 2, 15), &policy);

    assert_eq!(report.accounts_scanned, 5);
    assert_eq!(report.accounts_without_cycle, 1);
    assert!(report.failures.is_empty());

    let got: Vec<_> = report
        .intents
        .iter()
        .map(|r| (r.subject.as_str(), r.kind, r.target_date))
        .collect();
    assert_eq!(
        got,
        vec![
            ("Citi (TransUnion)", ReminderKind::DisputeFollowUp, d(2024, 2, 3)),
            ("Chase Freedom (Experian)", ReminderKind::DisputeFollowUp, d(2024, 2, 15)),
            ("Chase Freedom", ReminderKind::StatementClose, d(2024, 2, 15)),
            ("statement_alert", ReminderKind::Automation, d(2024, 2, 15)),
        ]
    );

    let statement = &report.intents[2];
    assert!(statement.body.contains("$1300.00"), "{}", statement.body);
}

/// The 31st anchor on Amex Blue resolves to Feb 29 in 2024.
#[test]
fn test_leap_day_statement_window() {
    let accounts = parse_accounts_csv(fixture("accounts.csv")).unwrap();
    let amex: Vec<_> = accounts.into_iter().filter(|a| a.name == "Amex Blue").collect();

    let report = sweep(&amex, &[], &[], d(2024, 2, 26), &LeadTimeConfig::default());
    // Payment due on the 25th already passed; only the statement window is open.
    assert_eq!(report.intents.len(), 1);
    assert_eq!(report.intents[0].kind, ReminderKind::StatementClose);
    assert_eq!(report.intents[0].target_date, d(2024, 2, 29));
}
