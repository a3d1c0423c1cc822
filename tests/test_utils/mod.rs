//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use axum::{Router, body::Body};
use tempfile::TempDir;
use tokio_rusqlite::Connection;

use meetbook::api::AppState;
use meetbook::api::app;
use meetbook::core::db::{async_db, migrate_db};
use meetbook::core::{AppConfig, RetryPolicy};
use meetbook::google::{CalendarCallResult, CalendarProvider};
use meetbook::meetings::MeetingTime;

pub const API_TOKEN: &str = "dummy-token";

/// Calendar provider double that always answers with the same result
pub struct StubCalendar {
    result: CalendarCallResult,
    calls: AtomicUsize,
}

impl StubCalendar {
    pub fn new(result: CalendarCallResult) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CalendarProvider for StubCalendar {
    async fn submit_event(
        &self,
        _time: &MeetingTime,
        _location: &str,
        _participants: &[String],
        _credential: &str,
    ) -> CalendarCallResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub struct TestApp {
    pub app: Router,
    pub db: Connection,
    pub config: AppConfig,
    // Removed when the test app is dropped
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> AppConfig {
    let storage_path = dir.path().display().to_string();
    AppConfig {
        db_path: AppConfig::db_path_for(&storage_path),
        storage_path,
        api_token: String::from(API_TOKEN),
        google_client_id: Some(String::from("test_client_id")),
        google_client_secret: Some(String::from("test_client_secret")),
        google_redirect_uri: Some(String::from("http://localhost/callback")),
        google_auth_url: String::from("https://accounts.google.com/o/oauth2/v2/auth"),
        google_token_url: String::from("http://127.0.0.1:1/token"),
        calendar_api_url: String::from("http://127.0.0.1:1"),
        http_retry: RetryPolicy::new(3, Duration::from_millis(5)),
    }
}

/// Creates a test application backed by a fresh sqlite file in a
/// temporary directory
pub async fn test_app_with(
    calendar: Arc<dyn CalendarProvider>,
    configure: impl FnOnce(&mut AppConfig),
) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = test_config(&dir);
    configure(&mut config);

    let db = async_db(&config.db_path)
        .await
        .expect("Failed to connect to async db");
    db.call(|conn| {
        migrate_db(conn).expect("Failed to migrate db");
        Ok(())
    })
    .await
    .unwrap();

    let app_state = AppState::with_calendar(db.clone(), config.clone(), calendar);
    TestApp {
        app: app(Arc::new(RwLock::new(app_state))),
        db,
        config,
        _dir: dir,
    }
}

pub async fn test_app(calendar: Arc<dyn CalendarProvider>) -> TestApp {
    test_app_with(calendar, |_| {}).await
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    let text = body_to_string(body).await;
    serde_json::from_str(&text).expect("Body is not json")
}

pub async fn count_rows(db: &Connection, table: &'static str) -> i64 {
    db.call(move |conn| {
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    })
    .await
    .unwrap()
}
