//! Google Calendar client for inserting meeting events

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::core::retry::{RetryPolicy, retry};
use crate::meetings::MeetingTime;

pub const INVALID_TIME_MESSAGE: &str = "Invalid meeting_time format.";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of asking the calendar provider to create an event
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCallResult {
    /// The provider created the event. Holds the provider's response body.
    Confirmed(Value),
    /// The provider could not be reached or refused the event
    Rejected(String),
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn submit_event(
        &self,
        time: &MeetingTime,
        location: &str,
        participants: &[String],
        credential: &str,
    ) -> CalendarCallResult;
}

#[derive(Debug, Serialize)]
pub struct EventStart {
    #[serde(rename = "dateTime")]
    pub date_time: String,
}

#[derive(Debug, Serialize)]
pub struct EventAttendee {
    pub email: String,
}

/// Request body for the events insert endpoint
#[derive(Debug, Serialize)]
pub struct EventInsertRequest {
    pub start: EventStart,
    pub location: String,
    pub attendees: Vec<EventAttendee>,
}

/// Render a meeting time as ISO 8601. The offset is included only when
/// the caller supplied one, and fractional seconds only when present.
pub fn format_event_time(time: &MeetingTime) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    match time {
        MeetingTime::Naive(time) => write!(out, "{}", time.format("%Y-%m-%dT%H:%M:%S%.f"))?,
        MeetingTime::Offset(time) => write!(out, "{}", time.format("%Y-%m-%dT%H:%M:%S%.f%:z"))?,
    }
    Ok(out)
}

#[derive(Clone, Debug)]
pub struct GoogleCalendar {
    client: Client,
    api_base_url: String,
    retry_policy: RetryPolicy,
}

impl GoogleCalendar {
    pub fn new(api_base_url: &str, retry_policy: RetryPolicy) -> Self {
        Self {
            client: Client::new(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            retry_policy,
        }
    }

    fn events_url(&self) -> String {
        format!(
            "{}/calendar/v3/calendars/primary/events",
            self.api_base_url
        )
    }

    /// Make a single insert attempt
    async fn insert_event(
        &self,
        url: &str,
        event: &EventInsertRequest,
        access_token: &str,
    ) -> Result<Value, anyhow::Error> {
        let res = self
            .client
            .post(url)
            .bearer_auth(access_token)
            .timeout(REQUEST_TIMEOUT)
            .json(event)
            .send()
            .await?;
        let status = res.status();
        let text = res
            .text()
            .await
            .with_context(|| format!("Reading event insert response failed ({})", status))?;
        if !status.is_success() {
            return Err(anyhow!("Event insert failed: {} ({})", status, text));
        }
        let payload: Value = serde_json::from_str(&text)?;
        Ok(payload)
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn submit_event(
        &self,
        time: &MeetingTime,
        location: &str,
        participants: &[String],
        credential: &str,
    ) -> CalendarCallResult {
        let Ok(date_time) = format_event_time(time) else {
            tracing::error!("Unable to format meeting time {:?}", time);
            return CalendarCallResult::Rejected(INVALID_TIME_MESSAGE.to_string());
        };

        let event = EventInsertRequest {
            start: EventStart { date_time },
            location: location.to_string(),
            attendees: participants
                .iter()
                .map(|email| EventAttendee {
                    email: email.clone(),
                })
                .collect(),
        };
        let url = self.events_url();

        let result = retry(
            &self.retry_policy,
            |_attempt| self.insert_event(&url, &event, credential),
            |_err| true,
        )
        .await;

        match result {
            Ok(payload) => CalendarCallResult::Confirmed(payload),
            Err(err) => {
                tracing::error!("Calendar event insert gave up: {:#}", err);
                CalendarCallResult::Rejected(format!("{:#}", err))
            }
        }
    }
}
