//! credstack-ingest: load user-maintained CSV files (accounts, disputes,
//! automation rules) into credstack-core value types.

pub mod config_text;
pub mod parsers;
pub mod types;

pub use config_text::{parse_interval_days, parse_lead_time_days, statement_lead_override};
pub use parsers::accounts::{parse_accounts_csv, parse_accounts_reader};
pub use parsers::automations::{parse_automations_csv, parse_automations_reader};
pub use parsers::disputes::{parse_disputes_csv, parse_disputes_reader};
pub use types::{AccountRow, AutomationRow, DisputeRow};
