use chrono::NaiveDate;
use serde::Deserialize;

/// Raw `accounts.csv` row:
/// `name,kind,balance,credit_limit,statement_day,due_day`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountRow {
    pub name: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub credit_limit: Option<f64>,
    #[serde(default)]
    pub statement_day: Option<u32>,
    #[serde(default)]
    pub due_day: Option<u32>,
}

/// Raw `disputes.csv` row:
/// `bureau,creditor,account_name,filed_on,status,follow_up_on`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisputeRow {
    pub bureau: String,
    pub creditor: String,
    #[serde(default)]
    pub account_name: Option<String>,
    pub filed_on: NaiveDate,
    #[serde(default)]
    pub status: Option<String>,
    /// Overrides the computed follow-up (e.g. after a reschedule)
    #[serde(default)]
    pub follow_up_on: Option<NaiveDate>,
}

/// Raw `automations.csv` row: `kind,active,configuration,last_run`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AutomationRow {
    pub kind: String,
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub configuration: Option<String>,
    #[serde(default)]
    pub last_run: Option<NaiveDate>,
}
