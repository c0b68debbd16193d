//! `disputes.csv` loader.

use anyhow::{Context, Result, anyhow};
use credstack_core::{Bureau, Dispute, DisputeStatus};
use std::io::Read;
use std::path::Path;

use crate::types::DisputeRow;

pub fn parse_disputes_csv(path: impl AsRef<Path>, interval_days: i64) -> Result<Vec<Dispute>> {
    let path = path.as_ref();
    let file = super::open(path)?;
    parse_disputes_reader(file, interval_days).with_context(|| format!("parsing {}", path.display()))
}

/// Parse disputes; rows without `follow_up_on` get `filed_on + interval_days`.
pub fn parse_disputes_reader<R: Read>(rdr: R, interval_days: i64) -> Result<Vec<Dispute>> {
    let mut rdr = super::reader(rdr);
    let mut out = Vec::new();

    for (i, result) in rdr.deserialize::<DisputeRow>().enumerate() {
        let row = result.with_context(|| format!("dispute row {}", i + 1))?;
        let dispute =
            row_to_dispute(row, interval_days).with_context(|| format!("dispute row {}", i + 1))?;
        out.push(dispute);
    }

    tracing::debug!(count = out.len(), "loaded disputes");
    Ok(out)
}

fn row_to_dispute(row: DisputeRow, interval_days: i64) -> Result<Dispute> {
    let bureau = Bureau::parse(&row.bureau).ok_or_else(|| {
        anyhow!(
            "invalid bureau '{}' (expected one of: {})",
            row.bureau,
            Bureau::ALL.map(|b| b.to_string()).join(", ")
        )
    })?;
    let status = DisputeStatus::parse(row.status.as_deref().unwrap_or("")).ok_or_else(|| {
        anyhow!(
            "invalid status '{}' (expected pending, in_progress, resolved, rejected)",
            row.status.as_deref().unwrap_or("")
        )
    })?;

    let mut dispute = Dispute::file(bureau, row.creditor, row.filed_on, interval_days)?
        .with_status(status);
    if let Some(name) = row.account_name {
        dispute = dispute.with_account(name);
    }
    if let Some(date) = row.follow_up_on {
        dispute.follow_up_on = date;
    }
    Ok(dispute)
}
