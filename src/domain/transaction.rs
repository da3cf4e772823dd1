use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

pub type TransactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money entering the ledger (salary, interest, refunds)
    Income,
    /// Money leaving the ledger (purchases, bills)
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry. Transactions are immutable once recorded -
/// there is no update operation, only delete-by-id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Assigned by the store on insert, never reused
    pub id: TransactionId,
    pub kind: TransactionKind,
    /// Category label; membership in the known set is the caller's contract
    pub category: String,
    /// Amount in cents (always positive; the kind carries the sign)
    pub amount_cents: Cents,
    pub description: Option<String>,
    /// Business date the transaction is attributed to
    pub occurred_at: DateTime<Utc>,
    /// When the transaction was recorded in the system
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Signed contribution of this transaction to the running balance.
    pub fn signed_amount(&self) -> Cents {
        match self.kind {
            TransactionKind::Income => self.amount_cents,
            TransactionKind::Expense => -self.amount_cents,
        }
    }
}

/// Rolling 30-day statistics produced by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    pub monthly_income: Cents,
    pub monthly_expense: Cents,
    /// Top expense categories in the window, descending by summed amount.
    /// At most five entries.
    pub top_categories: Vec<CategoryTotal>,
}

impl Statistics {
    pub fn empty() -> Self {
        Self {
            monthly_income: 0,
            monthly_expense: 0,
            top_categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Cents,
}
