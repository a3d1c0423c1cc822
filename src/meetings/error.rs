use thiserror::Error;

use super::validation::ValidationError;

#[derive(Debug, Error)]
pub enum MeetingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The calendar provider did not confirm the event. Carries the
    /// provider's last failure message.
    #[error("{0}")]
    ProviderRejected(String),
    #[error("Meeting not found")]
    NotFound,
    /// The event exists upstream but saving it locally failed
    #[error("Calendar event {event_id} was created but the meeting could not be saved: {reason:#}")]
    Unrecorded {
        event_id: String,
        reason: anyhow::Error,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
