//! Google OAuth consent URL and authorization code exchange

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::retry::{RetryPolicy, retry};

pub const SIGNUP_SCOPE: &str = "openid email profile";

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("Token exchange failed: {status} ({body})")]
    Status { status: StatusCode, body: String },
    #[error("Token exchange request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Token response could not be parsed: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl OAuthError {
    /// Authorization codes are single use so only failures that never
    /// reached Google, or that Google failed to process, are retried
    pub fn is_retryable(&self) -> bool {
        match self {
            OAuthError::Status { status, .. } => status.is_server_error(),
            OAuthError::Transport(_) => true,
            OAuthError::InvalidResponse(_) => false,
        }
    }
}

/// Profile fields returned with the token
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TokenProfile {
    pub sub: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Build the URL a user is redirected to in order to grant access
pub fn authorization_url(auth_url: &str, client_id: &str, redirect_uri: &str, state: &str) -> String {
    format!(
        "{}?response_type=code&scope={}&client_id={}&redirect_uri={}&state={}",
        auth_url,
        urlencoding::encode(SIGNUP_SCOPE),
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(state),
    )
}

async fn request_token(
    client: &Client,
    token_url: &str,
    params: &[(&str, &str)],
) -> Result<TokenProfile, OAuthError> {
    let res = client.post(token_url).form(params).send().await?;
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        return Err(OAuthError::Status { status, body: text });
    }
    Ok(serde_json::from_str(&text)?)
}

/// Exchange an authorization code for a token
pub async fn exchange_code_for_token(
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
    retry_policy: &RetryPolicy,
) -> Result<TokenProfile, OAuthError> {
    let client = Client::new();
    let params = [
        ("code", code),
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("redirect_uri", redirect_uri),
        ("grant_type", "authorization_code"),
    ];

    retry(
        retry_policy,
        |_attempt| request_token(&client, token_url, &params),
        OAuthError::is_retryable,
    )
    .await
}
