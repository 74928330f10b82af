use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid field name for sorting: '{0}'")]
    InvalidSortField(String),

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    #[error("Unknown entry type '{0}', expected 'income' or 'expense'")]
    UnknownEntryKind(String),
}
