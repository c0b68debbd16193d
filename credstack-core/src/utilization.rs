//! Utilization math: balance-to-limit ratios, status bands, and paydown targets.
//!
//! Ratios are percentages on a 0-100 scale. Values above 100 are meaningful
//! (over-limit) and are returned as-is. Nothing here rounds; callers format.

use serde::{Deserialize, Serialize};

use crate::account::AccountCycle;

/// `100 * balance / credit_limit`, or 0 when the limit is zero or negative.
pub fn utilization(balance: f64, credit_limit: f64) -> f64 {
    if credit_limit <= 0.0 {
        return 0.0;
    }
    100.0 * balance / credit_limit
}

/// Combined utilization across revolving accounts with a positive limit.
pub fn aggregate_utilization<'a, I>(accounts: I) -> f64
where
    I: IntoIterator<Item = &'a AccountCycle>,
{
    let (balance, limit) = accounts
        .into_iter()
        .filter(|a| a.kind.is_revolving() && a.credit_limit > 0.0)
        .fold((0.0, 0.0), |(b, l), a| (b + a.balance, l + a.credit_limit));
    utilization(balance, limit)
}

/// Thresholds (percent) that split utilization into status bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UtilizationThresholds {
    /// Ratio the user aims to report at statement close
    pub target_maximum: f64,
    /// Ratio above which the account is flagged
    pub warning_threshold: f64,
}

impl Default for UtilizationThresholds {
    fn default() -> Self {
        Self {
            target_maximum: 10.0,
            warning_threshold: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UtilizationStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "elevated")]
    Elevated,
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "over-limit")]
    OverLimit,
}

impl UtilizationStatus {
    pub fn classify(ratio: f64, thresholds: UtilizationThresholds) -> Self {
        if ratio > 100.0 {
            UtilizationStatus::OverLimit
        } else if ratio > thresholds.warning_threshold {
            UtilizationStatus::Warning
        } else if ratio > thresholds.target_maximum {
            UtilizationStatus::Elevated
        } else {
            UtilizationStatus::Healthy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UtilizationStatus::Healthy => "HEALTHY",
            UtilizationStatus::Elevated => "ELEVATED",
            UtilizationStatus::Warning => "WARNING",
            UtilizationStatus::OverLimit => "OVER LIMIT",
        }
    }
}

/// Amount to pay before the statement closes so the reported ratio is at
/// most `target_pct`. Zero when already there or when there is no limit.
pub fn paydown_to_target(balance: f64, credit_limit: f64, target_pct: f64) -> f64 {
    if credit_limit <= 0.0 {
        return 0.0;
    }
    let allowed = credit_limit * target_pct.max(0.0) / 100.0;
    (balance - allowed).max(0.0)
}

/// Coarse score estimate from overall utilization.
pub fn estimate_score(ratio: f64) -> u32 {
    if ratio < 10.0 {
        780
    } else if ratio < 30.0 {
        720
    } else if ratio < 50.0 {
        680
    } else if ratio < 70.0 {
        650
    } else {
        600
    }
}

/// Priority weight (0.0 - 1.0) of a single charge; larger charges move
/// utilization more and deserve earlier attention.
pub fn score_transaction(amount: f64) -> f64 {
    if amount > 1000.0 {
        0.9
    } else if amount > 500.0 {
        0.5
    } else {
        0.1
    }
}
