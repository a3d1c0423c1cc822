//! Meeting booking workflow
//!
//! Creating a meeting runs validation, then asks the calendar provider
//! for the event, and only records the meeting locally once the provider
//! confirmed it. Updates and deletes only touch local storage.

use serde_json::Value;

use super::db::MeetingStore;
use super::error::MeetingError;
use super::models::{MeetingChanges, MeetingRecord, MeetingRequest, NewMeeting};
use super::validation::{validate_meeting_changes, validate_meeting_input};
use crate::google::{CalendarCallResult, CalendarProvider};

/// Book a meeting with the calendar provider and record it. Returns the
/// provider's event payload as is.
pub async fn create_meeting(
    calendar: &dyn CalendarProvider,
    store: &dyn MeetingStore,
    request: MeetingRequest,
) -> Result<Value, MeetingError> {
    let meeting = validate_meeting_input(
        &request.meeting_time,
        &request.location,
        &request.participants,
    )?;

    let payload = match calendar
        .submit_event(
            &meeting.time,
            &meeting.location,
            &meeting.participants,
            &request.credential,
        )
        .await
    {
        CalendarCallResult::Confirmed(payload) => payload,
        CalendarCallResult::Rejected(reason) => {
            tracing::info!("Calendar provider rejected meeting: {}", reason);
            return Err(MeetingError::ProviderRejected(reason));
        }
    };

    let event_id = payload
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();
    let new_meeting = NewMeeting {
        owner_id: request.owner_id,
        time: meeting.time.stored(),
        participants: meeting.joined_participants(),
        location: meeting.location,
    };

    match store.insert(new_meeting).await {
        Ok(record) => {
            tracing::info!("Recorded meeting {} for calendar event {}", record.id, event_id);
            Ok(payload)
        }
        Err(reason) => {
            tracing::error!(
                "Calendar event {} was created for owner {} but saving the meeting failed: {:#}",
                event_id,
                request.owner_id,
                reason
            );
            Err(MeetingError::Unrecorded { event_id, reason })
        }
    }
}

/// Apply the supplied fields to a stored meeting and return the stored
/// result
pub async fn update_meeting(
    store: &dyn MeetingStore,
    id: i64,
    changes: MeetingChanges,
) -> Result<MeetingRecord, MeetingError> {
    let mut record = store.find_by_id(id).await?.ok_or(MeetingError::NotFound)?;

    let validated = validate_meeting_changes(
        changes.meeting_time.as_deref(),
        changes.location.as_deref(),
        changes.participants.as_deref(),
    )?;
    validated.apply_to(&mut record);
    store.update(&record).await?;

    store.find_by_id(id).await?.ok_or(MeetingError::NotFound)
}

pub async fn delete_meeting(store: &dyn MeetingStore, id: i64) -> Result<(), MeetingError> {
    if store.delete(id).await? {
        Ok(())
    } else {
        Err(MeetingError::NotFound)
    }
}

pub async fn meetings_for_owner(
    store: &dyn MeetingStore,
    owner_id: i64,
) -> Result<Vec<MeetingRecord>, MeetingError> {
    Ok(store.find_by_owner(owner_id).await?)
}
