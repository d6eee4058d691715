// crates/server/src/error.rs
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use liftlog_core::AnalysisError;
use liftlog_db::DbError;
use liftlog_types::WeightParseError;
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Structured JSON error response for API errors
#[derive(Debug, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// API error types that map to HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<WeightParseError> for ApiError {
    fn from(err: WeightParseError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Database(DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Database(DbError::DuplicateName { .. } | DbError::GroupInUse { .. }) => {
                StatusCode::CONFLICT
            }
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Analysis(AnalysisError::EmptyScope) => StatusCode::NO_CONTENT,
            ApiError::Analysis(AnalysisError::InFlight(_)) => StatusCode::CONFLICT,
            ApiError::Analysis(AnalysisError::InvalidRange { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Analysis(AnalysisError::FetchFailure(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Short text for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Database(e) => e.to_string(),
            ApiError::Analysis(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_response = match &self {
            ApiError::Database(db_err) => match db_err {
                DbError::NotFound { entity, id } => {
                    tracing::warn!(entity, id, "Not found");
                    ErrorResponse::with_details("Not found", db_err.to_string())
                }
                DbError::DuplicateName { .. } | DbError::GroupInUse { .. } => {
                    tracing::warn!(error = %db_err, "Conflict");
                    ErrorResponse::with_details("Conflict", db_err.to_string())
                }
                _ => {
                    tracing::error!(error = %db_err, "Database error");
                    ErrorResponse::with_details("Database error", db_err.to_string())
                }
            },
            ApiError::Analysis(AnalysisError::EmptyScope) => {
                return StatusCode::NO_CONTENT.into_response();
            }
            ApiError::Analysis(err @ AnalysisError::InFlight(_)) => {
                tracing::debug!(error = %err, "Analysis refused");
                ErrorResponse::with_details("Conflict", err.to_string())
            }
            ApiError::Analysis(err) => {
                tracing::error!(error = %err, "Analysis failed");
                ErrorResponse::with_details("Analysis failed", err.to_string())
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                ErrorResponse::with_details("Bad request", msg.clone())
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
