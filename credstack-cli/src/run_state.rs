//! Run history kept next to the reminder queue (`reminders/runs.json`).
//!
//! The input CSVs are user-maintained and reloaded every tick, so the dates
//! a sweep advances (automation `last_run`, dispute `follow_up_on`) live
//! here and are laid over the CSV values on load.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use credstack_core::Dispute;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::inputs::Inputs;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RunState {
    /// Automation kind -> last run
    #[serde(default)]
    pub automations: BTreeMap<String, NaiveDate>,
    /// Dispute key -> next follow-up
    #[serde(default)]
    pub disputes: BTreeMap<String, NaiveDate>,
}

fn dispute_key(dispute: &Dispute) -> String {
    format!("{}:{}", dispute.subject(), dispute.filed_on)
}

impl RunState {
    /// Missing file means no history yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(self).context("serialize run state")?;
        fs::write(path, s).with_context(|| format!("write {}", path.display()))
    }

    /// Lay recorded dates over freshly loaded inputs; the later date wins.
    pub fn apply(&self, inputs: &mut Inputs) {
        for automation in &mut inputs.automations {
            if let Some(&last) = self.automations.get(automation.kind.as_str()) {
                automation.last_run = Some(automation.last_run.map_or(last, |l| l.max(last)));
            }
        }
        for dispute in &mut inputs.disputes {
            if let Some(&next) = self.disputes.get(&dispute_key(dispute)) {
                dispute.follow_up_on = dispute.follow_up_on.max(next);
            }
        }
    }

    pub fn record(&mut self, inputs: &Inputs) {
        for automation in &inputs.automations {
            if let Some(last) = automation.last_run {
                self.automations.insert(automation.kind.as_str().to_string(), last);
            }
        }
        for dispute in &inputs.disputes {
            self.disputes.insert(dispute_key(dispute), dispute.follow_up_on);
        }
    }
}
