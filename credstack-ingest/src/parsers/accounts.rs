//! `accounts.csv` loader.
//!
//! ```text
//! name,kind,balance,credit_limit,statement_day,due_day
//! Chase Freedom,credit_card,500.00,5000,15,10
//! Car Loan,loan,9000,0,,5
//! ```

use anyhow::{Context, Result, bail};
use credstack_core::{AccountCycle, AccountKind, AnchorDay};
use std::io::Read;
use std::path::Path;

use crate::types::AccountRow;

/// Parse accounts from a CSV file on disk.
pub fn parse_accounts_csv(path: impl AsRef<Path>) -> Result<Vec<AccountCycle>> {
    let path = path.as_ref();
    let file = super::open(path)?;
    parse_accounts_reader(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse accounts from any reader. Invalid rows fail the whole load.
pub fn parse_accounts_reader<R: Read>(rdr: R) -> Result<Vec<AccountCycle>> {
    let mut rdr = super::reader(rdr);
    let mut accounts = Vec::new();

    for (i, result) in rdr.deserialize::<AccountRow>().enumerate() {
        let row = result.with_context(|| format!("account row {}", i + 1))?;
        let account = row_to_account(row).with_context(|| format!("account row {}", i + 1))?;
        accounts.push(account);
    }

    tracing::debug!(count = accounts.len(), "loaded accounts");
    Ok(accounts)
}

fn row_to_account(row: AccountRow) -> Result<AccountCycle> {
    if row.name.is_empty() {
        bail!("account name is empty");
    }

    let kind = match row.kind.as_deref() {
        None => AccountKind::CreditCard,
        Some(k) => match AccountKind::parse(k) {
            Some(kind) => kind,
            None => bail!(
                "account '{}': unknown kind '{}' (expected credit_card, loan, or mortgage)",
                row.name,
                k
            ),
        },
    };

    let balance = row.balance.unwrap_or(0.0);
    let credit_limit = row.credit_limit.unwrap_or(0.0);
    if !balance.is_finite() || !credit_limit.is_finite() {
        bail!("account '{}': balance and credit_limit must be finite numbers", row.name);
    }
    if balance < 0.0 {
        bail!("account '{}': balance must not be negative", row.name);
    }
    if credit_limit < 0.0 {
        bail!("account '{}': credit_limit must not be negative", row.name);
    }

    let mut account = AccountCycle::new(&row.name, kind, balance, credit_limit);
    if let Some(day) = row.statement_day {
        let day = AnchorDay::new(day)
            .with_context(|| format!("account '{}': statement_day", row.name))?;
        account = account.with_statement_day(day);
    }
    if let Some(day) = row.due_day {
        let day =
            AnchorDay::new(day).with_context(|| format!("account '{}': due_day", row.name))?;
        account = account.with_due_day(day);
    }
    Ok(account)
}
