use crate::enums::EntryKind;
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single income or expense record as persisted by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Magnitude of the transaction. Never negative; see `signed_amount`.
    pub amount: i64,
    pub date: NaiveDate,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl FinancialEntry {
    /// The entry's contribution to the ledger: `+amount` for income,
    /// `-amount` for expenses.
    pub fn signed_amount(&self) -> i64 {
        self.kind.sign() * self.amount
    }
}

/// The payload for creating an entry. Storage assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: i64,
    pub date: NaiveDate,
    pub category: String,
}

impl NewEntry {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_amount(self.amount)?;
        validate_category(&self.category)
    }
}

/// A partial update. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryUpdate {
    #[serde(rename = "type", default)]
    pub kind: Option<EntryKind>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub category: Option<String>,
}

impl EntryUpdate {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.amount.is_none() && self.date.is_none() && self.category.is_none()
    }

    /// Applies the provided fields onto `entry`.
    pub fn apply_to(&self, entry: &mut FinancialEntry) {
        if let Some(kind) = self.kind {
            entry.kind = kind;
        }
        if let Some(amount) = self.amount {
            entry.amount = amount;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(category) = &self.category {
            entry.category = category.clone();
        }
    }
}

fn validate_amount(amount: i64) -> Result<(), CoreError> {
    if amount < 0 {
        return Err(CoreError::InvalidInput(
            "amount".to_string(),
            format!("must be non-negative, got {amount}"),
        ));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), CoreError> {
    if category.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "category".to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}
