//! Transaction Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Money direction for transactions and their categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Finance ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    /// TransactionCategory reference (String ID)
    pub category_id: Option<String>,
    pub transaction_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ledger category (seeded reference data)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCategory {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreate {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category_id: Option<String>,
    pub transaction_date: DateTime<Utc>,
}

impl TransactionCreate {
    /// Build the full record. Timestamps are placeholders here; the
    /// repository stamps them on write.
    pub fn into_record(self, id: String) -> Transaction {
        let now = Utc::now();
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            category_id: self.category_id,
            transaction_date: self.transaction_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category_id: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
}

impl TransactionUpdate {
    /// Merge the supplied fields into an existing record.
    pub fn apply(self, transaction: &mut Transaction) {
        if let Some(kind) = self.kind {
            transaction.kind = kind;
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(description) = self.description {
            transaction.description = description;
        }
        if let Some(category_id) = self.category_id {
            transaction.category_id = Some(category_id);
        }
        if let Some(transaction_date) = self.transaction_date {
            transaction.transaction_date = transaction_date;
        }
    }
}
