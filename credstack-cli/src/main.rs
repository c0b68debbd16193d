use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use credstack_core::{
    DISPUTE_FOLLOW_UP_DAYS, UtilizationStatus, aggregate_utilization, estimate_score, evaluate_due,
    next_follow_up, occurrence_after, paydown_to_target,
};
use credstack_core::time::parse_date;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod inputs;
mod reminders_cmd;
mod run_state;
mod state;
mod watch;

use config::{config_path, init_config, load_config};
use inputs::{DataPaths, load_accounts, resolve_today};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CREDSTACK_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "credstack", version = VERSION, about = "Statement-cycle reminders for credit accounts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage ~/.credstack/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Per-account utilization, status and suggested paydown
    Status {
        /// Accounts CSV (defaults to [data].accounts)
        #[arg(long)]
        accounts: Option<PathBuf>,
    },

    /// Next occurrence of an anchor day and whether its reminder window is open
    Next {
        /// Day of month, 1-31
        #[arg(long)]
        day: u32,

        /// Lead time in days (default: statement lead from config)
        #[arg(long)]
        lead: Option<u32>,

        /// Evaluate as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<String>,
    },

    /// Preview upcoming statement and due dates for every account
    Schedule {
        #[arg(long)]
        accounts: Option<PathBuf>,

        /// Number of cycles to show (default: 3)
        #[arg(long, default_value_t = 3)]
        months: u32,

        #[arg(long)]
        today: Option<String>,
    },

    /// Follow-up date after a dispute filing or other event
    FollowUp {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        #[arg(long, default_value_t = DISPUTE_FOLLOW_UP_DAYS)]
        days: i64,
    },

    /// Reminder queue: plan, list, dispatch, status
    Remind {
        #[command(subcommand)]
        command: reminders_cmd::RemindersCommand,
    },

    /// Run the scheduler loop until Ctrl+C
    Watch {
        /// Seconds between ticks (default: [scheduler].interval_secs)
        #[arg(long)]
        interval_secs: Option<u64>,

        /// Run a single tick and exit
        #[arg(long, default_value_t = false)]
        once: bool,

        #[arg(long)]
        accounts: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => init_config()?,
            ConfigCommand::Show => {
                let cfg = load_config()?;
                println!("# {}", config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::Status { accounts } => status(accounts)?,

        Command::Next { day, lead, today } => {
            let cfg = load_config()?;
            let today = resolve_today(&cfg, today.as_deref())?;
            let lead = lead.unwrap_or(cfg.lead_times().statement_lead_days);
            let ev = evaluate_due(today, day, lead)?;

            println!("Next occurrence of day {}: {}", day, ev.target_date);
            println!("Reminder window opens: {} (lead {} days)", ev.fire_date, lead);
            println!(
                "Due today ({}): {} | {} days until target",
                today,
                if ev.is_due { "yes" } else { "no" },
                ev.days_until_target(today)
            );
        }

        Command::Schedule {
            accounts,
            months,
            today,
        } => schedule(accounts, months, today)?,

        Command::FollowUp { from, days } => {
            let start = parse_date(&from)?;
            println!("{}", next_follow_up(start, days)?);
        }

        Command::Remind { command } => reminders_cmd::run(command)?,

        Command::Watch {
            interval_secs,
            once,
            accounts,
        } => {
            let cfg = load_config()?;
            let paths = DataPaths {
                accounts,
                ..DataPaths::default()
            };
            watch::run(cfg, paths, interval_secs, once).await?;
        }
    }

    Ok(())
}

fn status(accounts: Option<PathBuf>) -> Result<()> {
    let cfg = load_config()?;
    let thresholds = cfg.lead_times().thresholds;
    let accounts = load_accounts(&cfg, accounts.as_deref())?;

    for a in &accounts {
        if !a.kind.is_revolving() {
            println!("{:<24} {:>10.2} balance ({})", a.name, a.balance, a.kind.as_str());
            continue;
        }
        let ratio = a.utilization();
        let status = UtilizationStatus::classify(ratio, thresholds);
        let paydown = paydown_to_target(a.balance, a.credit_limit, thresholds.target_maximum);
        print!(
            "{:<24} {:>10.2} / {:>10.2}  {:>6.1}%  {}",
            a.name,
            a.balance,
            a.credit_limit,
            ratio,
            status.label()
        );
        if paydown > 0.0 {
            print!("  pay ${:.2} to reach {:.0}%", paydown, thresholds.target_maximum);
        }
        println!();
    }

    let total = aggregate_utilization(&accounts);
    println!(
        "\nOverall utilization: {:.1}% ({}) | estimated score {}",
        total,
        UtilizationStatus::classify(total, thresholds).label(),
        estimate_score(total)
    );
    Ok(())
}

fn schedule(accounts: Option<PathBuf>, months: u32, today: Option<String>) -> Result<()> {
    let cfg = load_config()?;
    let today = resolve_today(&cfg, today.as_deref())?;
    let accounts = load_accounts(&cfg, accounts.as_deref())?;

    for a in &accounts {
        if a.statement_day.is_none() && a.due_day.is_none() {
            continue;
        }
        println!("{}", a.name);
        for i in 0..months.max(1) {
            let statement = a
                .statement_day
                .map(|d| occurrence_after(today, d.get(), i))
                .transpose()
                .with_context(|| format!("statement day for {}", a.name))?;
            let due = a
                .due_day
                .map(|d| occurrence_after(today, d.get(), i))
                .transpose()
                .with_context(|| format!("due day for {}", a.name))?;
            println!(
                "  statement {}  due {}",
                statement.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                due.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
            );
        }
    }
    Ok(())
}
