//! Router for the forum API. Every route requires the shared bearer
//! token.

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use axum_extra::extract::Query;
use tokio_rusqlite::Connection;

use super::db as forum_db;
use super::public;
use crate::api::Authorized;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

const MAX_PAGE_SIZE: u32 = 100;

fn db(state: &SharedState) -> Connection {
    state.read().expect("Unable to read share state").db.clone()
}

fn not_found() -> ApiError {
    ApiError::NotFound("Forum post not found".to_string())
}

async fn create_post(
    State(state): State<SharedState>,
    _auth: Authorized,
    Json(payload): Json<public::CreatePostRequest>,
) -> Result<(StatusCode, Json<public::ForumPostResponse>), ApiError> {
    let db = db(&state);
    let post = forum_db::insert_post(
        &db,
        payload.user_id,
        payload.content,
        payload.additional_metadata,
    )
    .await
    .map_err(|err| {
        tracing::error!("Creating forum post failed: {:#}", err);
        ApiError::BadRequest("Error creating forum post".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn update_post(
    State(state): State<SharedState>,
    _auth: Authorized,
    Path(post_id): Path<i64>,
    Json(payload): Json<public::UpdatePostRequest>,
) -> Result<Json<public::ForumPostResponse>, ApiError> {
    let db = db(&state);
    let post = forum_db::update_post(&db, post_id, payload.content, payload.additional_metadata)
        .await
        .map_err(|err| {
            tracing::error!("Updating forum post {} failed: {:#}", post_id, err);
            ApiError::BadRequest("Error updating forum post".to_string())
        })?
        .ok_or_else(not_found)?;

    Ok(Json(post))
}

async fn delete_post(
    State(state): State<SharedState>,
    _auth: Authorized,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let db = db(&state);
    let deleted = forum_db::delete_post(&db, post_id).await.map_err(|err| {
        tracing::error!("Deleting forum post {} failed: {:#}", post_id, err);
        ApiError::BadRequest("Error deleting forum post".to_string())
    })?;

    if !deleted {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_posts(
    State(state): State<SharedState>,
    _auth: Authorized,
    Query(params): Query<public::ListPostsQuery>,
) -> Result<Json<public::ListPostsResponse>, ApiError> {
    let page = params.page.max(1);
    let page_size = params.page_size.clamp(1, MAX_PAGE_SIZE);
    let db = db(&state);
    let (posts, total) = forum_db::list_posts(&db, page, page_size)
        .await
        .map_err(|err| {
            tracing::error!("Listing forum posts failed: {:#}", err);
            ApiError::BadRequest("Error fetching forum posts".to_string())
        })?;

    Ok(Json(public::ListPostsResponse {
        data: posts,
        page,
        page_size,
        total,
    }))
}

/// Create the forum router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route(
            "/{post_id}",
            put(update_post).patch(update_post).delete(delete_post),
        )
}
