//! Router for the meetings API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use serde_json::Value;
use tokio_rusqlite::Connection;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::google::CalendarProvider;
use crate::meetings;

type SharedState = Arc<RwLock<AppState>>;

fn db(state: &SharedState) -> Connection {
    state.read().expect("Unable to read share state").db.clone()
}

// Book a meeting with the calendar provider and record it
async fn create_meeting(
    State(state): State<SharedState>,
    Json(payload): Json<public::CreateMeetingRequest>,
) -> Result<Json<Value>, ApiError> {
    let (db, calendar): (Connection, Arc<dyn CalendarProvider>) = {
        let shared_state = state.read().expect("Unable to read share state");
        (shared_state.db.clone(), Arc::clone(&shared_state.calendar))
    };

    let event = meetings::create_meeting(calendar.as_ref(), &db, payload.into()).await?;
    Ok(Json(event))
}

async fn update_meeting(
    State(state): State<SharedState>,
    Path(meeting_id): Path<i64>,
    Json(payload): Json<public::UpdateMeetingRequest>,
) -> Result<Json<public::MeetingResponse>, ApiError> {
    let db = db(&state);
    let record = meetings::update_meeting(&db, meeting_id, payload.into()).await?;
    Ok(Json(record.into()))
}

async fn delete_meeting(
    State(state): State<SharedState>,
    Path(meeting_id): Path<i64>,
) -> Result<Json<public::DeleteMeetingResponse>, ApiError> {
    let db = db(&state);
    meetings::delete_meeting(&db, meeting_id).await?;
    Ok(Json(public::DeleteMeetingResponse {
        detail: "Meeting deleted".to_string(),
    }))
}

async fn meetings_by_user(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<public::MeetingResponse>>, ApiError> {
    let db = db(&state);
    let records = meetings::meetings_for_owner(&db, user_id).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

/// Create the meetings router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(create_meeting))
        .route("/{meeting_id}", put(update_meeting).delete(delete_meeting))
        .route("/user/{user_id}", get(meetings_by_user))
}
