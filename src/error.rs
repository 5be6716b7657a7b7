use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::envelope;
use crate::validation::ValidationError;

/// Custom error type for API endpoints
///
/// Both kinds collapse to the same 400 failure envelope; the distinction
/// only shows up in logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload was rejected before reaching the store
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Any failure of the underlying record store
    #[error("{0:#}")]
    Store(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(err) => tracing::warn!("Rejected payload: {}", err),
            ApiError::Store(err) => tracing::error!("Store operation failed: {:#}", err),
        }

        envelope::failure(self.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Store(err)
    }
}
