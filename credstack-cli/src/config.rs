use anyhow::{Context, Result};
use credstack_core::{DISPUTE_FOLLOW_UP_DAYS, LeadTimeConfig, UtilizationThresholds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_credstack_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileSection,
    pub data: DataSection,
    pub automation: AutomationSection,
    pub reminders: RemindersSection,
    pub scheduler: SchedulerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileSection {
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
}

/// Input CSVs; relative paths resolve against the credstack home dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataSection {
    pub accounts: PathBuf,
    pub disputes: PathBuf,
    pub automations: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutomationSection {
    pub payment_lead_days: u32,
    pub dispute_follow_up_days: i64,
    pub utilization: UtilizationSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UtilizationSection {
    pub target_maximum: f64,
    pub warning_threshold: f64,
    /// Days before statement close to pay the balance down
    pub neutralization_lead_time_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemindersSection {
    pub max_dispatch_per_run: usize,
    /// Label recorded on queued intents; delivery itself is out of process
    pub default_channel: String,
    pub default_recipient: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulerSection {
    /// Seconds between `watch` ticks
    pub interval_secs: u64,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
        }
    }
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            accounts: PathBuf::from("accounts.csv"),
            disputes: PathBuf::from("disputes.csv"),
            automations: PathBuf::from("automations.csv"),
        }
    }
}

impl Default for AutomationSection {
    fn default() -> Self {
        let lead = LeadTimeConfig::default();
        Self {
            payment_lead_days: lead.payment_lead_days,
            dispute_follow_up_days: DISPUTE_FOLLOW_UP_DAYS,
            utilization: UtilizationSection::default(),
        }
    }
}

impl Default for UtilizationSection {
    fn default() -> Self {
        let thresholds = UtilizationThresholds::default();
        Self {
            target_maximum: thresholds.target_maximum,
            warning_threshold: thresholds.warning_threshold,
            neutralization_lead_time_days: LeadTimeConfig::default().statement_lead_days,
        }
    }
}

impl Default for RemindersSection {
    fn default() -> Self {
        Self {
            max_dispatch_per_run: 10,
            default_channel: "log".to_string(),
            default_recipient: None,
        }
    }
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl Config {
    /// Lead times and thresholds in the shape the scheduler consumes.
    pub fn lead_times(&self) -> LeadTimeConfig {
        let u = &self.automation.utilization;
        LeadTimeConfig {
            statement_lead_days: u.neutralization_lead_time_days,
            payment_lead_days: self.automation.payment_lead_days,
            dispute_follow_up_days: self.automation.dispute_follow_up_days,
            thresholds: UtilizationThresholds {
                target_maximum: u.target_maximum,
                warning_threshold: u.warning_threshold,
            },
        }
    }

    /// Resolve a `[data]` path against `home` when it is relative.
    pub fn resolve(&self, home: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            home.join(path)
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_credstack_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults; a present but malformed file is an error.
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.automation.utilization.target_maximum, 10.0);
        assert_eq!(cfg.automation.utilization.neutralization_lead_time_days, 3);
        assert_eq!(cfg.lead_times(), LeadTimeConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[automation.utilization]
neutralization_lead_time_days = 5

[scheduler]
interval_secs = 3600
"#,
        )
        .unwrap();
        assert_eq!(cfg.lead_times().statement_lead_days, 5);
        assert_eq!(cfg.lead_times().thresholds.target_maximum, 10.0);
        assert_eq!(cfg.scheduler.interval_secs, 3600);
        assert_eq!(cfg.profile.timezone, "America/Chicago");
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert!(s.contains("[automation.utilization]"));
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_missing_file_is_default() {
        let p = std::env::temp_dir().join("credstack-test-missing-config.toml");
        assert_eq!(load_config_from(&p).unwrap(), Config::default());
    }

    #[test]
    fn test_resolve_relative_data_path() {
        let cfg = Config::default();
        let home = Path::new("/tmp/credstack-home");
        assert_eq!(
            cfg.resolve(home, &cfg.data.accounts),
            PathBuf::from("/tmp/credstack-home/accounts.csv")
        );
        assert_eq!(
            cfg.resolve(home, Path::new("/data/a.csv")),
            PathBuf::from("/data/a.csv")
        );
    }
}
