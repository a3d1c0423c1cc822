//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::meetings::MeetingError;

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

// Errors

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    /// Failure with a status chosen by an upstream service
    Upstream(StatusCode, String),
    /// Server-side failure whose message is safe to show the caller
    ServerError(String),
    Internal(anyhow::Error),
}

impl ApiError {
    fn status_and_detail(self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Unauthorized(detail) => (StatusCode::UNAUTHORIZED, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::Upstream(status, detail) => (status, detail),
            ApiError::ServerError(detail) => {
                tracing::error!("{}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
            ApiError::Internal(err) => {
                // Full detail stays in the logs
                tracing::error!("{:#}", err);
                match err.downcast_ref::<MeetingError>() {
                    Some(MeetingError::Unrecorded { .. }) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Meeting was booked with the calendar provider but could not be saved"
                            .to_string(),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    ),
                }
            }
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorDetail { detail })).into_response()
    }
}

fn from_meeting_error(err: MeetingError) -> ApiError {
    match err {
        MeetingError::Validation(_) | MeetingError::ProviderRejected(_) => {
            ApiError::BadRequest(err.to_string())
        }
        MeetingError::NotFound => ApiError::NotFound(err.to_string()),
        MeetingError::Unrecorded { .. } => ApiError::Internal(err.into()),
        MeetingError::Internal(err) => ApiError::Internal(err),
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`. Domain
/// errors are mapped to their status code, anything else is a 500.
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err: anyhow::Error = err.into();
        match err.downcast::<MeetingError>() {
            Ok(meeting_err) => from_meeting_error(meeting_err),
            Err(err) => ApiError::Internal(err),
        }
    }
}

// Re-export public types from each route

pub mod auth {
    pub use crate::api::routes::auth::public::*;
}

pub mod forum {
    pub use crate::api::routes::forum::public::*;
}

pub mod meetings {
    pub use crate::api::routes::meetings::public::*;
}
