use std::env;

use crate::core::retry::RetryPolicy;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_CALENDAR_API_URL: &str = "https://www.googleapis.com";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    // Shared bearer token accepted by the forum routes
    pub api_token: String,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_redirect_uri: Option<String>,
    pub google_auth_url: String,
    pub google_token_url: String,
    pub calendar_api_url: String,
    pub http_retry: RetryPolicy,
}

impl AppConfig {
    /// Path to the sqlite database file inside a storage directory
    pub fn db_path_for(storage_path: &str) -> String {
        format!("{}/meetbook.sqlite", storage_path.trim_end_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("MEETBOOK_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = Self::db_path_for(&storage_path);
        let api_token =
            env::var("MEETBOOK_API_TOKEN").unwrap_or_else(|_| "dummy-token".to_string());
        let google_client_id = env::var("CLIENT_ID").ok();
        let google_client_secret = env::var("CLIENT_SECRET").ok();
        let google_redirect_uri = env::var("REDIRECT_URI").ok();
        let google_auth_url =
            env::var("MEETBOOK_GOOGLE_AUTH_URL").unwrap_or_else(|_| GOOGLE_AUTH_URL.to_string());
        let google_token_url = env::var("MEETBOOK_GOOGLE_TOKEN_URL")
            .unwrap_or_else(|_| GOOGLE_TOKEN_URL.to_string());
        let calendar_api_url = env::var("MEETBOOK_CALENDAR_API_URL")
            .unwrap_or_else(|_| GOOGLE_CALENDAR_API_URL.to_string());

        Self {
            storage_path,
            db_path,
            api_token,
            google_client_id,
            google_client_secret,
            google_redirect_uri,
            google_auth_url,
            google_token_url,
            calendar_api_url,
            http_retry: RetryPolicy::default(),
        }
    }
}
