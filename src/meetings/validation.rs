//! Validation and normalization of meeting input

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use thiserror::Error;

use super::models::{MeetingRecord, MeetingTime};

// Tried in order after RFC 3339
const ISO_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];
const TWELVE_HOUR_FORMAT: &str = "%Y-%m-%d %I:%M %p";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("Email pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("meeting_time must be in ISO format or 'yyyy-mm-dd HH:MM AM/PM'")]
    InvalidTime,
    #[error("Location must not be empty")]
    EmptyLocation,
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMeeting {
    pub time: MeetingTime,
    pub location: String,
    pub participants: Vec<String>,
}

impl ValidatedMeeting {
    pub fn joined_participants(&self) -> String {
        self.participants.join(",")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedChanges {
    pub time: Option<MeetingTime>,
    pub location: Option<String>,
    pub participants: Option<Vec<String>>,
}

impl ValidatedChanges {
    /// Write the supplied fields onto `record`
    pub fn apply_to(self, record: &mut MeetingRecord) {
        if let Some(time) = self.time {
            record.time = time.stored();
        }
        if let Some(location) = self.location {
            record.location = location;
        }
        if let Some(participants) = self.participants {
            record.participants = participants.join(",");
        }
    }
}

/// Parse a meeting time given either as ISO 8601 or as
/// `yyyy-mm-dd hh:mm AM/PM`. An offset in the input is kept.
pub fn parse_meeting_time(raw: &str) -> Result<MeetingTime, ValidationError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(MeetingTime::Offset(dt));
    }
    for fmt in ISO_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(MeetingTime::Naive(dt));
        }
    }

    NaiveDateTime::parse_from_str(raw, TWELVE_HOUR_FORMAT)
        .map(MeetingTime::Naive)
        .map_err(|_| ValidationError::InvalidTime)
}

pub fn validate_location(location: &str) -> Result<String, ValidationError> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyLocation);
    }
    Ok(trimmed.to_string())
}

/// Check the syntax of an email address and return its canonical form.
/// The canonical form drops surrounding whitespace and keeps the case of
/// both the local part and the domain.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim();
    if email.len() > 254 || !EMAIL_RE.is_match(email) {
        return None;
    }

    let (local, _) = email.split_once('@')?;
    if local.len() > 64 || local.starts_with('.') || local.ends_with('.') || local.contains("..")
    {
        return None;
    }

    Some(email.to_string())
}

/// Validate every participant, stopping at the first invalid one
pub fn validate_participants(participants: &[String]) -> Result<Vec<String>, ValidationError> {
    participants
        .iter()
        .map(|p| normalize_email(p).ok_or_else(|| ValidationError::InvalidEmail(p.clone())))
        .collect()
}

pub fn validate_meeting_input(
    raw_time: &str,
    location: &str,
    participants: &[String],
) -> Result<ValidatedMeeting, ValidationError> {
    let location = validate_location(location)?;
    let time = parse_meeting_time(raw_time)?;
    let participants = validate_participants(participants)?;

    Ok(ValidatedMeeting {
        time,
        location,
        participants,
    })
}

/// Validate only the fields that are present. Every supplied field is
/// checked before anything is returned so a partial failure never leaks
/// into the stored record.
pub fn validate_meeting_changes(
    raw_time: Option<&str>,
    location: Option<&str>,
    participants: Option<&[String]>,
) -> Result<ValidatedChanges, ValidationError> {
    let location = location.map(validate_location).transpose()?;
    let time = raw_time.map(parse_meeting_time).transpose()?;
    let participants = participants.map(validate_participants).transpose()?;

    Ok(ValidatedChanges {
        time,
        location,
        participants,
    })
}
