//! Public types for the meetings API
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::meetings::{MeetingChanges, MeetingRecord, MeetingRequest};

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateMeetingRequest {
    pub user_id: i64,
    pub meeting_time: String,
    pub location: String,
    pub participants: Vec<String>,
    pub oauth_token: String,
}

impl From<CreateMeetingRequest> for MeetingRequest {
    fn from(req: CreateMeetingRequest) -> Self {
        MeetingRequest {
            owner_id: req.user_id,
            meeting_time: req.meeting_time,
            location: req.location,
            participants: req.participants,
            credential: req.oauth_token,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateMeetingRequest {
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub participants: Option<Vec<String>>,
}

impl From<UpdateMeetingRequest> for MeetingChanges {
    fn from(req: UpdateMeetingRequest) -> Self {
        MeetingChanges {
            meeting_time: req.meeting_time,
            location: req.location,
            participants: req.participants,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MeetingResponse {
    pub meeting_id: i64,
    pub user_id: i64,
    pub time: NaiveDateTime,
    pub location: String,
    pub participants: String,
}

impl From<MeetingRecord> for MeetingResponse {
    fn from(record: MeetingRecord) -> Self {
        MeetingResponse {
            meeting_id: record.id,
            user_id: record.owner_id,
            time: record.time,
            location: record.location,
            participants: record.participants,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteMeetingResponse {
    pub detail: String,
}
