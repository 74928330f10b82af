use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an entry brings money in or takes it out.
///
/// The amount of an entry is always stored as a magnitude; the kind alone
/// decides the sign of its contribution to any statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[serde(alias = "доход")]
    Income,
    #[serde(alias = "расход")]
    Expense,
}

impl EntryKind {
    /// The multiplier applied to an amount of this kind.
    pub fn sign(&self) -> i64 {
        match self {
            EntryKind::Income => 1,
            EntryKind::Expense => -1,
        }
    }

    /// The stored and exported label.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" | "доход" => Ok(EntryKind::Income),
            "expense" | "расход" => Ok(EntryKind::Expense),
            other => Err(CoreError::UnknownEntryKind(other.to_string())),
        }
    }
}
