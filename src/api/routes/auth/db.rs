//! Database queries for users
use anyhow::{Error, Result};
use rusqlite::params;
use tokio_rusqlite::Connection;

/// Insert or refresh a user keyed by their Google id. Returns the local
/// user id.
pub async fn upsert_user(
    db: &Connection,
    google_id: &str,
    email: &str,
    name: Option<String>,
    profile_picture: Option<String>,
) -> Result<i64, Error> {
    let google_id = google_id.to_owned();
    let email = email.to_owned();
    let user_id = db
        .call(move |conn| {
            let id = conn.query_row(
                "INSERT INTO users (google_id, email, name, profile_picture) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(google_id) DO UPDATE SET email = excluded.email, name = excluded.name, profile_picture = excluded.profile_picture
                 RETURNING id",
                params![google_id, email, name, profile_picture],
                |row| row.get(0),
            )?;
            Ok(id)
        })
        .await?;
    Ok(user_id)
}
