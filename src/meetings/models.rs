use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Serialize;

/// A parsed meeting time. Input that carried an offset keeps it so the
/// calendar provider books the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingTime {
    Naive(NaiveDateTime),
    Offset(DateTime<FixedOffset>),
}

impl MeetingTime {
    /// Value written to storage. Offset times are stored as UTC.
    pub fn stored(&self) -> NaiveDateTime {
        match self {
            MeetingTime::Naive(time) => *time,
            MeetingTime::Offset(time) => time.naive_utc(),
        }
    }
}

/// A request to book a meeting, as received from a caller. Nothing in
/// here has been validated yet.
#[derive(Debug, Clone)]
pub struct MeetingRequest {
    pub owner_id: i64,
    pub meeting_time: String,
    pub location: String,
    pub participants: Vec<String>,
    /// OAuth bearer token forwarded to the calendar provider
    pub credential: String,
}

/// Partial update of a stored meeting. `None` fields are left as is.
#[derive(Debug, Clone, Default)]
pub struct MeetingChanges {
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub participants: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub owner_id: i64,
    pub time: NaiveDateTime,
    pub location: String,
    pub participants: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingRecord {
    pub id: i64,
    pub owner_id: i64,
    pub time: NaiveDateTime,
    pub location: String,
    /// Validated participant emails joined with ","
    pub participants: String,
}
