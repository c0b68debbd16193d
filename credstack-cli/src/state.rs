use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CREDSTACK_HOME`, or `~/.credstack`.
pub fn credstack_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("CREDSTACK_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".credstack"))
}

pub fn ensure_credstack_home() -> Result<PathBuf> {
    let dir = credstack_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn reminders_dir() -> Result<PathBuf> {
    let dir = ensure_credstack_home()?.join("reminders");
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
