//! Router for Google OAuth signup and login

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::Query;

use super::db as users_db;
use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::google::oauth::{OAuthError, authorization_url, exchange_code_for_token};

type SharedState = Arc<RwLock<AppState>>;

const SIGNUP_STATE: &str = "signup";

fn missing_config() -> ApiError {
    ApiError::ServerError("OAuth configuration is missing.".to_string())
}

// Redirect the user to Google's consent page
async fn google_signup(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let url = {
        let shared_state = state.read().expect("Unable to read share state");
        let AppConfig {
            google_client_id,
            google_redirect_uri,
            google_auth_url,
            ..
        } = &shared_state.config;
        let (Some(client_id), Some(redirect_uri)) = (google_client_id, google_redirect_uri) else {
            return Err(missing_config());
        };
        authorization_url(google_auth_url, client_id, redirect_uri, SIGNUP_STATE)
    };

    // 302 to match what OAuth clients expect from a consent redirect
    let mut response = Redirect::to(&url).into_response();
    *response.status_mut() = http::StatusCode::FOUND;
    Ok(response)
}

// Exchange the authorization code and return the user's profile
async fn google_callback(
    State(state): State<SharedState>,
    Query(params): Query<public::CallbackQuery>,
) -> Result<Json<public::UserProfile>, ApiError> {
    if let Some(error) = params.error {
        tracing::error!("Error during Google OAuth callback: {}", error);
        return Err(ApiError::BadRequest(format!("Google OAuth error: {}", error)));
    }
    let Some(code) = params.code else {
        return Err(ApiError::BadRequest(
            "Authorization code not provided.".to_string(),
        ));
    };

    let (db, config) = {
        let shared_state = state.read().expect("Unable to read share state");
        (shared_state.db.clone(), shared_state.config.clone())
    };
    let (Some(client_id), Some(client_secret), Some(redirect_uri)) = (
        config.google_client_id.as_deref(),
        config.google_client_secret.as_deref(),
        config.google_redirect_uri.as_deref(),
    ) else {
        return Err(missing_config());
    };

    let token = exchange_code_for_token(
        &config.google_token_url,
        client_id,
        client_secret,
        &code,
        redirect_uri,
        &config.http_retry,
    )
    .await
    .map_err(|err| {
        tracing::error!("{}", err);
        match err {
            OAuthError::Status { status, .. } => {
                ApiError::Upstream(status, "Token exchange failed with Google.".to_string())
            }
            _ => ApiError::ServerError("Failed to exchange token.".to_string()),
        }
    })?;

    if let (Some(google_id), Some(email)) = (&token.sub, &token.email) {
        let user_id = users_db::upsert_user(
            &db,
            google_id,
            email,
            token.name.clone(),
            token.picture.clone(),
        )
        .await?;
        tracing::info!("Signed in user {} ({})", user_id, email);
    }

    Ok(Json(public::UserProfile {
        google_id: token.sub,
        email: token.email,
        name: token.name,
        profile_picture: token.picture,
    }))
}

/// Create the Google OAuth router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/signup", get(google_signup))
        .route("/callback", get(google_callback))
}
