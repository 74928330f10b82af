use analytics::AnalyticsError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::DbError;
use serde_json::json;
use thiserror::Error;
use tracker::TrackerError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Tracker(TrackerError::Invalid(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Tracker(TrackerError::Analytics(AnalyticsError::NoData)) => (
                StatusCode::NOT_FOUND,
                "There are no entries in the requested range".to_string(),
            ),
            AppError::Tracker(TrackerError::Storage(DbError::NotFound)) => (
                StatusCode::NOT_FOUND,
                "There is no item with such id".to_string(),
            ),
            AppError::Tracker(TrackerError::Storage(db_err)) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Tracker(TrackerError::Analytics(analytics_err)) => {
                tracing::error!(error = ?analytics_err, "Analytics error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred during analysis".to_string(),
                )
            }
            AppError::Tracker(TrackerError::Export(export_err)) => {
                tracing::error!(error = ?export_err, "Export error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The export could not be produced".to_string(),
                )
            }
        };

        if status.is_client_error() {
            tracing::warn!(%status, error = %error_message, "Rejected request.");
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
