//! Account records the scheduler reads: balances, limits, and billing-cycle anchors.

use serde::{Deserialize, Serialize};

use crate::cycle::AnchorDay;
use crate::utilization::utilization;

/// Account kinds tracked by the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountKind {
    #[serde(rename = "credit_card")]
    CreditCard,
    #[serde(rename = "loan")]
    Loan,
    #[serde(rename = "mortgage")]
    Mortgage,
}

impl AccountKind {
    /// Only revolving accounts count toward utilization.
    pub fn is_revolving(&self) -> bool {
        matches!(self, AccountKind::CreditCard)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::CreditCard => "credit_card",
            AccountKind::Loan => "loan",
            AccountKind::Mortgage => "mortgage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "credit_card" | "card" => Some(AccountKind::CreditCard),
            "loan" => Some(AccountKind::Loan),
            "mortgage" => Some(AccountKind::Mortgage),
            _ => None,
        }
    }
}

/// Billing-cycle metadata plus balance for a single account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountCycle {
    /// Display name, also used as the reminder subject
    pub name: String,
    pub kind: AccountKind,
    /// Current balance (non-negative)
    pub balance: f64,
    /// Credit limit; zero means "no limit on file"
    pub credit_limit: f64,
    /// Statement closing day, if known
    pub statement_day: Option<AnchorDay>,
    /// Payment due day, if known
    pub due_day: Option<AnchorDay>,
}

impl AccountCycle {
    pub fn new(name: impl Into<String>, kind: AccountKind, balance: f64, credit_limit: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            balance,
            credit_limit,
            statement_day: None,
            due_day: None,
        }
    }

    pub fn with_statement_day(mut self, day: AnchorDay) -> Self {
        self.statement_day = Some(day);
        self
    }

    pub fn with_due_day(mut self, day: AnchorDay) -> Self {
        self.due_day = Some(day);
        self
    }

    /// Utilization percentage for this account alone.
    pub fn utilization(&self) -> f64 {
        utilization(self.balance, self.credit_limit)
    }

    /// Remaining credit before hitting the limit (zero when over).
    pub fn available_credit(&self) -> f64 {
        (self.credit_limit - self.balance).max(0.0)
    }
}
