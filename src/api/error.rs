//! API error type and its HTTP mapping.
//!
//! | Variant       | Status | Body                                  |
//! |---------------|--------|---------------------------------------|
//! | `Validation`  | 422    | every violation, one per line         |
//! | `Parse`       | 400    | decoder message                       |
//! | `Persistence` | 500    | generic message, details logged only  |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::types::ErrorResponse;
use crate::db::StoreError;
use crate::validation::Violations;

pub const PERSISTENCE_ERROR_MESSAGE: &str = "Internal storage error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(Violations),

    #[error("{0}")]
    Parse(String),

    #[error("{}", PERSISTENCE_ERROR_MESSAGE)]
    Persistence(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Parse(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Violations> for ApiError {
    fn from(violations: Violations) -> Self {
        ApiError::Validation(violations)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Persistence(e) => tracing::error!("Storage failure: {}", e),
            ApiError::Parse(msg) => tracing::debug!("Rejected undecodable body: {}", msg),
            ApiError::Validation(v) => {
                tracing::debug!("Rejected request with {} violation(s)", v.len())
            }
        }
        let body = ErrorResponse {
            errors: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
