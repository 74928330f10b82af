use analytics::AnalyticsError;
use core_types::CoreError;
use database::DbError;
use export::ExportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid request: {0}")]
    Invalid(#[from] CoreError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl TrackerError {
    /// Whether the caller, rather than the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            TrackerError::Invalid(_)
                | TrackerError::Analytics(AnalyticsError::NoData)
                | TrackerError::Storage(DbError::NotFound)
        )
    }
}
