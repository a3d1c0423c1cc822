//! Shared-token bearer check for protected routes

use std::sync::{Arc, RwLock};

use axum::extract::FromRequestParts;
use http::{header, request::Parts};

use super::public::ApiError;
use super::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Extracting this succeeds only when the request carries
/// `Authorization: Bearer <api_token>`
#[derive(Debug)]
pub struct Authorized;

impl FromRequestParts<SharedState> for Authorized {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Missing or invalid token".to_string()))?;

        let expected = state
            .read()
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("Shared state lock poisoned")))?
            .config
            .api_token
            .clone();

        if token != expected {
            tracing::debug!("Rejected request with an unknown bearer token");
            return Err(ApiError::Unauthorized("Invalid token".to_string()));
        }

        Ok(Authorized)
    }
}
