//! Resolve "today" and load the CSV inputs a sweep needs.

use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};
use credstack_core::time::{local_today, parse_date};
use credstack_core::{AccountCycle, Automation, Dispute, LeadTimeConfig};
use credstack_ingest::{
    parse_accounts_csv, parse_automations_csv, parse_disputes_csv, statement_lead_override,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::state::credstack_home;

/// Explicit `--today` wins; otherwise the current date in the configured timezone.
pub fn resolve_today(cfg: &Config, explicit: Option<&str>) -> Result<NaiveDate> {
    match explicit {
        Some(s) => parse_date(s),
        None => local_today(Utc::now(), &cfg.profile.timezone),
    }
}

/// Per-command overrides for the `[data]` paths.
#[derive(Debug, Clone, Default)]
pub struct DataPaths {
    pub accounts: Option<PathBuf>,
    pub disputes: Option<PathBuf>,
    pub automations: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct Inputs {
    pub accounts: Vec<AccountCycle>,
    pub disputes: Vec<Dispute>,
    pub automations: Vec<Automation>,
}

impl Inputs {
    /// Config lead times, with the statement lead replaced by an active
    /// `statement_alert` rule's "Lead time: N days" when present.
    pub fn lead_times(&self, cfg: &Config) -> LeadTimeConfig {
        let mut policy = cfg.lead_times();
        if let Some(days) = statement_lead_override(&self.automations) {
            debug!(days, "statement lead time overridden by automation rule");
            policy.statement_lead_days = days;
        }
        policy
    }
}

pub fn load_accounts(cfg: &Config, explicit: Option<&Path>) -> Result<Vec<AccountCycle>> {
    let home = credstack_home()?;
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.resolve(&home, &cfg.data.accounts));
    if !path.exists() {
        bail!(
            "Accounts file not found: {} (pass --accounts <csv> or set [data].accounts)",
            path.display()
        );
    }
    parse_accounts_csv(&path)
}

/// Accounts are required; disputes and automations are optional files.
pub fn load_inputs(cfg: &Config, paths: &DataPaths) -> Result<Inputs> {
    let home = credstack_home()?;
    let accounts = load_accounts(cfg, paths.accounts.as_deref())?;

    let disputes_path = paths
        .disputes
        .clone()
        .unwrap_or_else(|| cfg.resolve(&home, &cfg.data.disputes));
    let disputes = if disputes_path.exists() {
        parse_disputes_csv(&disputes_path, cfg.lead_times().dispute_follow_up_days)?
    } else {
        debug!(path = %disputes_path.display(), "no disputes file");
        Vec::new()
    };

    let automations_path = paths
        .automations
        .clone()
        .unwrap_or_else(|| cfg.resolve(&home, &cfg.data.automations));
    let automations = if automations_path.exists() {
        parse_automations_csv(&automations_path)?
    } else {
        debug!(path = %automations_path.display(), "no automations file");
        Vec::new()
    };

    info!(
        accounts = accounts.len(),
        disputes = disputes.len(),
        automations = automations.len(),
        "loaded inputs"
    );
    Ok(Inputs {
        accounts,
        disputes,
        automations,
    })
}
