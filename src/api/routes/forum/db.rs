//! Database queries for the forum API
use anyhow::{Error, Result};
use rusqlite::{OptionalExtension, params};
use serde_json::Value;
use tokio_rusqlite::Connection;

use super::public::ForumPostResponse;

const SELECT_POST: &str = "SELECT post_id, user_id, content, timestamp FROM forum_posts";

fn post_from_row(row: &rusqlite::Row) -> rusqlite::Result<ForumPostResponse> {
    Ok(ForumPostResponse {
        post_id: row.get(0)?,
        user_id: row.get(1)?,
        content: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

pub async fn insert_post(
    db: &Connection,
    user_id: i64,
    content: String,
    metadata: Option<Value>,
) -> Result<ForumPostResponse, Error> {
    let post = db
        .call(move |conn| {
            conn.execute(
                "INSERT INTO forum_posts (user_id, content, additional_metadata) VALUES (?1, ?2, ?3)",
                params![user_id, content, metadata],
            )?;
            let post_id = conn.last_insert_rowid();
            let post = conn.query_row(
                &format!("{} WHERE post_id = ?1", SELECT_POST),
                [post_id],
                post_from_row,
            )?;
            Ok(post)
        })
        .await?;
    Ok(post)
}

/// Update the supplied fields of a post. Returns `None` if the post
/// doesn't exist.
pub async fn update_post(
    db: &Connection,
    post_id: i64,
    content: Option<String>,
    metadata: Option<Value>,
) -> Result<Option<ForumPostResponse>, Error> {
    let post = db
        .call(move |conn| {
            let tx = conn.transaction()?;
            let exists = tx
                .query_row(
                    "SELECT 1 FROM forum_posts WHERE post_id = ?1",
                    [post_id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if !exists {
                return Ok(None);
            }
            if let Some(content) = content {
                tx.execute(
                    "UPDATE forum_posts SET content = ?1 WHERE post_id = ?2",
                    params![content, post_id],
                )?;
            }
            if let Some(metadata) = metadata {
                tx.execute(
                    "UPDATE forum_posts SET additional_metadata = ?1 WHERE post_id = ?2",
                    params![metadata, post_id],
                )?;
            }
            let post = tx.query_row(
                &format!("{} WHERE post_id = ?1", SELECT_POST),
                [post_id],
                post_from_row,
            )?;
            tx.commit()?;
            Ok(Some(post))
        })
        .await?;
    Ok(post)
}

/// Returns false if the post doesn't exist
pub async fn delete_post(db: &Connection, post_id: i64) -> Result<bool, Error> {
    let deleted = db
        .call(move |conn| {
            let count = conn.execute("DELETE FROM forum_posts WHERE post_id = ?1", [post_id])?;
            Ok(count > 0)
        })
        .await?;
    Ok(deleted)
}

/// Fetch one page of posts along with the total number of posts
pub async fn list_posts(
    db: &Connection,
    page: u32,
    page_size: u32,
) -> Result<(Vec<ForumPostResponse>, i64), Error> {
    let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);
    let limit = i64::from(page_size);
    let result = db
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{} ORDER BY post_id LIMIT ?1 OFFSET ?2",
                SELECT_POST
            ))?;
            let posts = stmt
                .query_map([limit, offset], post_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            let total: i64 =
                conn.query_row("SELECT COUNT(*) FROM forum_posts", [], |row| row.get(0))?;
            Ok((posts, total))
        })
        .await?;
    Ok(result)
}
