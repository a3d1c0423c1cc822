//! API routes module

pub mod auth;
pub mod forum;
pub mod meetings;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Google OAuth signup and login
        .nest("/auth/google", auth::router())
        // Forum post routes
        .nest("/forum", forum::router())
        // Meeting scheduling routes
        .nest("/meetings", meetings::router())
}
