//! `automations.csv` loader.

use anyhow::{Context, Result, anyhow, bail};
use credstack_core::{Automation, AutomationKind};
use std::io::Read;
use std::path::Path;

use crate::config_text::parse_interval_days;
use crate::types::AutomationRow;

pub fn parse_automations_csv(path: impl AsRef<Path>) -> Result<Vec<Automation>> {
    let path = path.as_ref();
    let file = super::open(path)?;
    parse_automations_reader(file).with_context(|| format!("parsing {}", path.display()))
}

pub fn parse_automations_reader<R: Read>(rdr: R) -> Result<Vec<Automation>> {
    let mut rdr = super::reader(rdr);
    let mut out = Vec::new();

    for (i, result) in rdr.deserialize::<AutomationRow>().enumerate() {
        let row = result.with_context(|| format!("automation row {}", i + 1))?;
        let rule = row_to_automation(row).with_context(|| format!("automation row {}", i + 1))?;
        out.push(rule);
    }

    tracing::debug!(count = out.len(), "loaded automations");
    Ok(out)
}

fn row_to_automation(row: AutomationRow) -> Result<Automation> {
    let kind = AutomationKind::parse(&row.kind).ok_or_else(|| {
        anyhow!(
            "invalid automation type '{}'. Must be one of: {}",
            row.kind,
            AutomationKind::ALL.map(|k| k.as_str()).join(", ")
        )
    })?;

    let mut rule = Automation::new(kind);
    rule.active = parse_flag(row.active.as_deref())?;
    if let Some(text) = row.configuration {
        if let Some(days) = parse_interval_days(&text) {
            rule.interval_days = days;
        }
        rule.configuration = Some(text);
    }
    rule.last_run = row.last_run;
    Ok(rule)
}

fn parse_flag(s: Option<&str>) -> Result<bool> {
    match s.map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("1") | Some("true") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("no") => Ok(false),
        Some(other) => bail!("invalid active flag '{other}'"),
    }
}
