use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Aggregation was requested over an empty set, so average, median and
    /// percentiles are undefined.
    #[error("No entries to aggregate")]
    NoData,

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
