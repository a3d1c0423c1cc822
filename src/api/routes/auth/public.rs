//! Public types for the Google OAuth API
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Profile of the user who completed the OAuth flow
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    pub google_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}
