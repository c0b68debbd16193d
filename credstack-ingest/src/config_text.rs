//! Free-text automation configuration ("Lead time: 3 days", "Scan every Friday",
//! "every 10 days") reduced to the numbers the scheduler needs.

use credstack_core::{Automation, AutomationKind};
use regex::Regex;
use std::sync::OnceLock;

fn lead_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)lead\s*(?:time)?\s*[:=]?\s*(\d+)\s*days?").expect("static regex")
    })
}

fn every_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)every\s+(\d+)\s*(day|week|month)s?").expect("static regex"))
}

/// `"Lead time: 3 days"` -> `Some(3)`.
pub fn parse_lead_time_days(text: &str) -> Option<u32> {
    lead_re().captures(text)?.get(1)?.as_str().parse().ok()
}

/// Interval in days from phrases like "every 10 days", "every 2 weeks",
/// "weekly", "monthly", or a weekday name ("every Friday" is weekly).
pub fn parse_interval_days(text: &str) -> Option<i64> {
    if let Some(caps) = every_re().captures(text) {
        let n: i64 = caps[1].parse().ok()?;
        let unit = caps[2].to_ascii_lowercase();
        return Some(match unit.as_str() {
            "week" => n * 7,
            "month" => n * 30,
            _ => n,
        });
    }

    let lower = text.to_ascii_lowercase();
    const WEEKDAYS: [&str; 7] = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    if lower.contains("weekly") || WEEKDAYS.iter().any(|d| lower.contains(d)) {
        Some(7)
    } else if lower.contains("monthly") {
        Some(30)
    } else if lower.contains("daily") {
        Some(1)
    } else {
        None
    }
}

/// Lead time configured on the first active `statement_alert` rule, if any.
pub fn statement_lead_override(automations: &[Automation]) -> Option<u32> {
    automations
        .iter()
        .filter(|a| a.active && a.kind == AutomationKind::StatementAlert)
        .find_map(|a| a.configuration.as_deref().and_then(parse_lead_time_days))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_time() {
        assert_eq!(parse_lead_time_days("Lead time: 3 days"), Some(3));
        assert_eq!(parse_lead_time_days("lead 5 days before close"), Some(5));
        assert_eq!(parse_lead_time_days("LEAD TIME=1 day"), Some(1));
        assert_eq!(parse_lead_time_days("Scan every Friday at 9 AM"), None);
    }

    #[test]
    fn test_interval() {
        assert_eq!(parse_interval_days("every 10 days"), Some(10));
        assert_eq!(parse_interval_days("Every 2 weeks"), Some(14));
        assert_eq!(parse_interval_days("every 1 month"), Some(30));
        assert_eq!(parse_interval_days("Scan every Friday at 9 AM"), Some(7));
        assert_eq!(parse_interval_days("monthly summary"), Some(30));
        assert_eq!(parse_interval_days("Lead time: 3 days"), None);
    }

    #[test]
    fn test_statement_lead_override() {
        let mut alert = Automation::new(AutomationKind::StatementAlert);
        alert.configuration = Some("Lead time: 4 days".to_string());
        let mut scan = Automation::new(AutomationKind::WeeklyScan);
        scan.configuration = Some("lead 9 days".to_string());

        assert_eq!(statement_lead_override(&[scan.clone(), alert.clone()]), Some(4));

        alert.active = false;
        assert_eq!(statement_lead_override(&[scan, alert]), None);
    }
}
