use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

#[derive(Debug, ThisError)]
pub enum RosterError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} {id} referenced by this record does not exist")]
    MissingReference { entity: &'static str, id: i64 },

    #[error("{entity} {id} still has {count} {dependents} assigned")]
    HasDependents {
        entity: &'static str,
        id: i64,
        dependents: &'static str,
        count: i64,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl RosterError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        RosterError::NotFound { entity, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        RosterError::Validation(msg.into())
    }

    /// Stable machine-readable code carried in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            RosterError::NotFound { .. } => "NOT_FOUND",
            RosterError::Validation(_) => "VALIDATION_FAILED",
            RosterError::MissingReference { .. } => "MISSING_REFERENCE",
            RosterError::HasDependents { .. } => "HAS_DEPENDENTS",
            RosterError::DatabaseError(_) => "PERSISTENCE_FAILURE",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RosterError::NotFound { .. } => StatusCode::NOT_FOUND,
            RosterError::Validation(_) => StatusCode::BAD_REQUEST,
            RosterError::MissingReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            RosterError::HasDependents { .. } => StatusCode::CONFLICT,
            RosterError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            RosterError::DatabaseError(e) => {
                // Details stay in the server log.
                error!(error = %e, "persistence failure");
                "The record could not be saved.".to_string()
            }
            other => {
                warn!(status = %status, error = %other, "request rejected");
                other.to_string()
            }
        };
        let body = ApiErrorBody {
            code: self.code().to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
