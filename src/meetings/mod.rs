pub mod db;
pub mod error;
pub mod models;
pub mod validation;
pub mod workflow;

pub use db::MeetingStore;
pub use error::MeetingError;
pub use models::{MeetingChanges, MeetingRecord, MeetingRequest, MeetingTime, NewMeeting};
pub use validation::ValidationError;
pub use workflow::{create_meeting, delete_meeting, meetings_for_owner, update_meeting};
