//! Periodic scheduler loop: every tick re-reads the inputs, sweeps, queues
//! new intents and dispatches whatever is due.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::inputs::{DataPaths, load_inputs, resolve_today};
use crate::reminders_cmd::{ReminderQueue, dispatch, plan};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub queued: usize,
    pub dispatched: usize,
}

/// A single evaluation pass. Inputs are reloaded each time so edits to the
/// CSVs between ticks are picked up.
pub fn tick(cfg: &Config, paths: &DataPaths, queue: &ReminderQueue) -> Result<TickOutcome> {
    let today = resolve_today(cfg, None)?;
    let inputs = load_inputs(cfg, paths)?;
    let queued = plan(cfg, &inputs, today, queue)?;
    let dispatched = dispatch(queue, today, cfg.reminders.max_dispatch_per_run, false)?;
    Ok(TickOutcome { queued, dispatched })
}

/// Run until Ctrl+C (or after one tick with `once`). A failed tick is logged
/// and the loop keeps going.
pub async fn run(cfg: Config, paths: DataPaths, interval_secs: Option<u64>, once: bool) -> Result<()> {
    let queue = ReminderQueue::open_default()?;

    if once {
        let out = tick(&cfg, &paths, &queue)?;
        info!(queued = out.queued, dispatched = out.dispatched, "tick complete");
        return Ok(());
    }

    let secs = interval_secs.unwrap_or(cfg.scheduler.interval_secs).max(1);
    info!(interval_secs = secs, "scheduler loop started");
    let mut ticker = tokio::time::interval(Duration::from_secs(secs));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match tick(&cfg, &paths, &queue) {
                    Ok(out) if out.queued == 0 && out.dispatched == 0 => debug!("tick: nothing due"),
                    Ok(out) => info!(queued = out.queued, dispatched = out.dispatched, "tick complete"),
                    Err(e) => {
                        let msg = format!("{e:#}");
                        error!(error = %msg, "tick failed");
                    }
                }
            }
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    error!(error = %e, "failed to listen for ctrl_c");
                }
                break;
            }
        }
    }

    info!("scheduler loop stopped");
    Ok(())
}
