use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Subcommand;
use credstack_core::{ReminderIntent, advance_run_state, sweep};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{Config, load_config};
use crate::inputs::{DataPaths, Inputs, load_inputs, resolve_today};
use crate::run_state::RunState;
use crate::state::reminders_dir;

#[derive(Subcommand, Debug)]
pub enum RemindersCommand {
    /// Sweep accounts, disputes and automations; append due intents to the local queue
    Plan {
        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<String>,

        #[arg(long)]
        accounts: Option<PathBuf>,

        #[arg(long)]
        disputes: Option<PathBuf>,

        #[arg(long)]
        automations: Option<PathBuf>,
    },

    /// List queued reminder intents (newest first)
    List {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Deliver due, unsent intents from the queue
    Dispatch {
        /// Dry-run only; do not mark anything sent
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Max sends in one run (default from config.reminders.max_dispatch_per_run)
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        today: Option<String>,
    },

    /// Queue status summary (due/future/sent)
    Status {
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedIntent {
    pub recipient: Option<String>,
    pub channel: String,
    pub intent: ReminderIntent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStatus {
    pub total: usize,
    pub due: usize,
    pub future: usize,
    pub sent: usize,
}

/// JSONL intent queue, sent-keys log and run history, all under one directory.
pub struct ReminderQueue {
    queue: PathBuf,
    sent: PathBuf,
    runs: PathBuf,
}

impl ReminderQueue {
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(&reminders_dir()?))
    }

    pub fn at(dir: &Path) -> Self {
        Self {
            queue: dir.join("intents.jsonl"),
            sent: dir.join("sent_keys.txt"),
            runs: dir.join("runs.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.queue
    }

    pub fn runs_path(&self) -> &Path {
        &self.runs
    }

    pub fn read_all(&self) -> Result<Vec<QueuedIntent>> {
        if !self.queue.exists() {
            return Ok(Vec::new());
        }
        let f = fs::File::open(&self.queue)
            .with_context(|| format!("open {}", self.queue.display()))?;
        let mut rows = Vec::new();
        for (i, line) in BufReader::new(f).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<QueuedIntent>(&line) {
                Ok(v) => rows.push(v),
                Err(e) => warn!(line = i + 1, error = %e, "skipping unreadable queue entry"),
            }
        }
        Ok(rows)
    }

    pub fn sent_keys(&self) -> Result<HashSet<String>> {
        if !self.sent.exists() {
            return Ok(HashSet::new());
        }
        let f = fs::File::open(&self.sent)
            .with_context(|| format!("open {}", self.sent.display()))?;
        Ok(BufReader::new(f)
            .lines()
            .map_while(|l| l.ok())
            .filter(|l| !l.trim().is_empty())
            .collect())
    }

    /// Append intents whose dedupe key is not queued yet; returns how many were added.
    pub fn enqueue(
        &self,
        intents: Vec<ReminderIntent>,
        channel: &str,
        recipient: Option<&str>,
    ) -> Result<usize> {
        let mut known: HashSet<String> = self
            .read_all()?
            .into_iter()
            .map(|q| q.intent.dedupe_key)
            .collect();

        if let Some(parent) = self.queue.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.queue)
            .with_context(|| format!("open {}", self.queue.display()))?;

        let mut added = 0usize;
        for intent in intents {
            if !known.insert(intent.dedupe_key.clone()) {
                continue;
            }
            let row = QueuedIntent {
                recipient: recipient.map(str::to_string),
                channel: channel.to_string(),
                intent,
            };
            writeln!(f, "{}", serde_json::to_string(&row)?)?;
            added += 1;
        }
        Ok(added)
    }

    /// Unsent intents whose reminder date has arrived.
    pub fn due(&self, today: NaiveDate) -> Result<Vec<QueuedIntent>> {
        let sent = self.sent_keys()?;
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|q| q.intent.remind_on <= today && !sent.contains(&q.intent.dedupe_key))
            .collect())
    }

    pub fn mark_sent(&self, dedupe_key: &str) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.sent)
            .with_context(|| format!("open {}", self.sent.display()))?;
        writeln!(f, "{}", dedupe_key)?;
        Ok(())
    }

    pub fn status(&self, today: NaiveDate) -> Result<QueueStatus> {
        let sent = self.sent_keys()?;
        let mut st = QueueStatus::default();
        for q in self.read_all()? {
            st.total += 1;
            if sent.contains(&q.intent.dedupe_key) {
                st.sent += 1;
            } else if q.intent.remind_on <= today {
                st.due += 1;
            } else {
                st.future += 1;
            }
        }
        Ok(st)
    }
}

pub fn run(cmd: RemindersCommand) -> Result<()> {
    let cfg = load_config()?;
    let queue = ReminderQueue::open_default()?;

    match cmd {
        RemindersCommand::Plan {
            today,
            accounts,
            disputes,
            automations,
        } => {
            let today = resolve_today(&cfg, today.as_deref())?;
            let inputs = load_inputs(
                &cfg,
                &DataPaths {
                    accounts,
                    disputes,
                    automations,
                },
            )?;
            let added = plan(&cfg, &inputs, today, &queue)?;
            println!("Queued {} new reminder intents in {}", added, queue.path().display());
            Ok(())
        }
        RemindersCommand::List { limit } => list(&queue, limit),
        RemindersCommand::Dispatch {
            dry_run,
            limit,
            today,
        } => {
            let today = resolve_today(&cfg, today.as_deref())?;
            let limit = limit.unwrap_or(cfg.reminders.max_dispatch_per_run);
            let sent = dispatch(&queue, today, limit, dry_run)?;
            println!("Dispatch complete. Sent {} reminders.", sent);
            Ok(())
        }
        RemindersCommand::Status { today } => {
            let today = resolve_today(&cfg, today.as_deref())?;
            let st = queue.status(today)?;
            println!(
                "Queue: {} total, {} due, {} future, {} sent",
                st.total, st.due, st.future, st.sent
            );
            Ok(())
        }
    }
}

/// One sweep over `inputs`, appending new due intents to the queue.
///
/// Recorded run history is applied first, and whatever fired is advanced
/// (automations marked run, disputes rescheduled) once the intents are
/// queued, so each rule fires once per interval across repeated calls.
pub fn plan(cfg: &Config, inputs: &Inputs, today: NaiveDate, queue: &ReminderQueue) -> Result<usize> {
    let policy = inputs.lead_times(cfg);
    let mut runs = RunState::load(queue.runs_path())?;
    let mut inputs = inputs.clone();
    runs.apply(&mut inputs);

    let report = sweep(
        &inputs.accounts,
        &inputs.disputes,
        &inputs.automations,
        today,
        &policy,
    );

    for failure in &report.failures {
        println!("Skipped {}: {}", failure.subject, failure.error);
    }

    let added = queue.enqueue(
        report.intents,
        &cfg.reminders.default_channel,
        cfg.reminders.default_recipient.as_deref(),
    )?;

    let advanced = advance_run_state(&mut inputs.automations, &mut inputs.disputes, today, &policy)?;
    if advanced > 0 {
        runs.record(&inputs);
        runs.save(queue.runs_path())?;
    }
    info!(%today, added, advanced, "planned reminders");
    Ok(added)
}

fn list(queue: &ReminderQueue, limit: usize) -> Result<()> {
    let rows = queue.read_all()?;
    if rows.is_empty() {
        println!("No reminder queue at {}", queue.path().display());
        return Ok(());
    }

    for (i, r) in rows.iter().rev().take(limit).enumerate() {
        println!(
            "{}. [{}] {} (remind {}, for {})",
            i + 1,
            r.channel,
            r.intent.title,
            r.intent.remind_on,
            r.intent.target_date
        );
    }
    Ok(())
}

/// Deliver due intents. Delivery providers live outside this tool, so the
/// `log` channel writes the reminder to stdout and records it as sent.
pub fn dispatch(queue: &ReminderQueue, today: NaiveDate, limit: usize, dry_run: bool) -> Result<usize> {
    let due = queue.due(today)?;
    if due.is_empty() {
        debug!(%today, "no due unsent reminders");
        return Ok(0);
    }

    let mut sent_now = 0usize;
    for item in due.into_iter().take(limit) {
        if dry_run {
            println!("[DRY RUN] would send [{}] {}", item.channel, item.intent.title);
            continue;
        }

        match item.channel.as_str() {
            "log" => {
                println!("--- REMINDER DUE: {} ---", item.intent.title);
                println!("{}", item.intent.body);
                if let Some(to) = &item.recipient {
                    println!("To: {to}");
                }
                queue.mark_sent(&item.intent.dedupe_key)?;
                info!(key = %item.intent.dedupe_key, "reminder dispatched");
                sent_now += 1;
            }
            other => {
                println!("Skipping unsupported channel: {other}");
            }
        }
    }

    Ok(sent_now)
}
