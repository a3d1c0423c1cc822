pub mod gcal;
pub mod oauth;

pub use gcal::{CalendarCallResult, CalendarProvider, GoogleCalendar};
