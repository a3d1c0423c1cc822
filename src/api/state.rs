use std::sync::Arc;

use tokio_rusqlite::Connection;

use crate::core::AppConfig;
use crate::google::{CalendarProvider, GoogleCalendar};

pub struct AppState {
    pub db: Connection,
    pub config: AppConfig,
    pub calendar: Arc<dyn CalendarProvider>,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig) -> Self {
        let calendar = GoogleCalendar::new(&config.calendar_api_url, config.http_retry);
        Self::with_calendar(db, config, Arc::new(calendar))
    }

    /// Use a specific calendar provider instead of Google's
    pub fn with_calendar(
        db: Connection,
        config: AppConfig,
        calendar: Arc<dyn CalendarProvider>,
    ) -> Self {
        Self {
            db,
            config,
            calendar,
        }
    }
}
