//! Integration tests for the meetings API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    use meetbook::core::RetryPolicy;
    use meetbook::google::{CalendarCallResult, GoogleCalendar};
    use meetbook::meetings::{MeetingStore, NewMeeting};

    use crate::test_utils::{StubCalendar, body_to_json, body_to_string, count_rows, test_app};

    fn confirmed() -> CalendarCallResult {
        CalendarCallResult::Confirmed(json!({"id": "evt1", "status": "confirmed"}))
    }

    fn meeting_payload() -> serde_json::Value {
        json!({
            "user_id": 1,
            "meeting_time": "2023-10-26T15:30:00",
            "location": "Conference Room A",
            "participants": ["user1@example.com", "user2@example.com"],
            "oauth_token": "valid_token"
        })
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .method(method)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn seed_meeting(db: &tokio_rusqlite::Connection, owner_id: i64, location: &str) -> i64 {
        let time = chrono::NaiveDate::from_ymd_opt(2023, 10, 26)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        db.insert(NewMeeting {
            owner_id,
            time,
            location: location.to_string(),
            participants: "user1@example.com,user2@example.com".to_string(),
        })
        .await
        .unwrap()
        .id
    }

    /// Tests a confirmed meeting returns the provider payload verbatim
    #[tokio::test]
    async fn it_creates_a_meeting() {
        let calendar = StubCalendar::new(confirmed());
        let test = test_app(calendar.clone()).await;

        let response = test
            .app
            .oneshot(json_request("POST", "/api/meetings", meeting_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body, json!({"id": "evt1", "status": "confirmed"}));
        assert_eq!(calendar.calls(), 1);

        let stored = test.db.find_by_owner(1).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].participants, "user1@example.com,user2@example.com");
    }

    /// Tests a provider rejection is a 400 carrying the provider message
    #[tokio::test]
    async fn it_returns_400_when_provider_rejects() {
        let calendar = StubCalendar::new(CalendarCallResult::Rejected(
            "Failed to create event".to_string(),
        ));
        let test = test_app(calendar.clone()).await;

        let response = test
            .app
            .oneshot(json_request("POST", "/api/meetings", meeting_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("Failed to create event")
        );
        assert_eq!(count_rows(&test.db, "meetings").await, 0);
    }

    /// Tests a booking the provider confirmed but that couldn't be saved
    #[tokio::test]
    async fn it_returns_500_when_confirmed_meeting_is_not_saved() {
        let calendar = StubCalendar::new(confirmed());
        let test = test_app(calendar.clone()).await;
        test.db
            .call(|conn| {
                conn.execute_batch("DROP TABLE meetings")?;
                Ok(())
            })
            .await
            .unwrap();

        let response = test
            .app
            .oneshot(json_request("POST", "/api/meetings", meeting_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_to_string(response.into_body()).await;
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({"detail": "Meeting was booked with the calendar provider but could not be saved"})
        );
        assert!(!body.contains("evt1"));
        assert!(!body.contains("no such table"));
        assert_eq!(calendar.calls(), 1);
    }

    /// Tests the whole path against a calendar API that always answers
    /// `Bad Request`
    #[tokio::test]
    async fn it_returns_400_after_provider_retries_fail() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/calendar/v3/calendars/primary/events")
            .with_status(400)
            .with_body("Bad Request")
            .expect(3)
            .create_async()
            .await;

        let calendar = Arc::new(GoogleCalendar::new(
            &server.url(),
            RetryPolicy::new(3, Duration::from_millis(5)),
        ));
        let test = test_app(calendar).await;

        let response = test
            .app
            .oneshot(json_request("POST", "/api/meetings", meeting_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert!(body["detail"].as_str().unwrap().contains("Bad Request"));
        assert_eq!(count_rows(&test.db, "meetings").await, 0);
        mock.assert_async().await;
    }

    /// Tests an invalid participant is rejected before calling the provider
    #[tokio::test]
    async fn it_returns_400_for_invalid_participant() {
        let calendar = StubCalendar::new(confirmed());
        let test = test_app(calendar.clone()).await;

        let mut payload = meeting_payload();
        payload["participants"] = json!(["user1@example.com", "invalid-email"]);
        let response = test
            .app
            .oneshot(json_request("POST", "/api/meetings", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Invalid email: invalid-email");
        assert_eq!(calendar.calls(), 0);
    }

    /// Tests an unparseable meeting time is rejected
    #[tokio::test]
    async fn it_returns_400_for_invalid_time() {
        let calendar = StubCalendar::new(confirmed());
        let test = test_app(calendar.clone()).await;

        let mut payload = meeting_payload();
        payload["meeting_time"] = json!("next tuesday");
        let response = test
            .app
            .oneshot(json_request("POST", "/api/meetings", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(
            body["detail"],
            "meeting_time must be in ISO format or 'yyyy-mm-dd HH:MM AM/PM'"
        );
        assert_eq!(calendar.calls(), 0);
    }

    /// Tests a missing oauth_token is a body validation error
    #[tokio::test]
    async fn it_returns_422_for_missing_oauth_token() {
        let calendar = StubCalendar::new(confirmed());
        let test = test_app(calendar.clone()).await;

        let mut payload = meeting_payload();
        payload.as_object_mut().unwrap().remove("oauth_token");
        let response = test
            .app
            .oneshot(json_request("POST", "/api/meetings", payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(calendar.calls(), 0);
    }

    /// Tests updating a meeting with valid data
    #[tokio::test]
    async fn it_updates_a_meeting() {
        let test = test_app(StubCalendar::new(confirmed())).await;
        let meeting_id = seed_meeting(&test.db, 1, "Conference Room A").await;

        let response = test
            .app
            .oneshot(json_request(
                "PUT",
                &format!("/api/meetings/{}", meeting_id),
                json!({
                    "meeting_time": "2023-10-26T11:00:00",
                    "location": "Conference Room B",
                    "participants": ["user1@example.com", "user3@example.com"]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["meeting_id"], meeting_id);
        assert_eq!(body["location"], "Conference Room B");
        assert!(body["time"].as_str().unwrap().contains("2023-10-26T11:00:00"));
        assert_eq!(body["participants"], "user1@example.com,user3@example.com");
    }

    /// Tests a blank location is rejected and nothing else changes
    #[tokio::test]
    async fn it_rejects_blank_location_on_update() {
        let test = test_app(StubCalendar::new(confirmed())).await;
        let meeting_id = seed_meeting(&test.db, 1, "Initial Location").await;
        let before = test.db.find_by_id(meeting_id).await.unwrap();

        let response = test
            .app
            .oneshot(json_request(
                "PUT",
                &format!("/api/meetings/{}", meeting_id),
                json!({"location": "   "}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Location must not be empty");
        assert_eq!(test.db.find_by_id(meeting_id).await.unwrap(), before);
    }

    /// Tests an invalid email in an update is reported
    #[tokio::test]
    async fn it_rejects_invalid_email_on_update() {
        let test = test_app(StubCalendar::new(confirmed())).await;
        let meeting_id = seed_meeting(&test.db, 1, "Room").await;

        let response = test
            .app
            .oneshot(json_request(
                "PUT",
                &format!("/api/meetings/{}", meeting_id),
                json!({"participants": ["invalid-email", "user2@example.com"]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Invalid email: invalid-email");
    }

    /// Tests updating a meeting that doesn't exist
    #[tokio::test]
    async fn it_returns_404_when_updating_missing_meeting() {
        let test = test_app(StubCalendar::new(confirmed())).await;

        let response = test
            .app
            .oneshot(json_request(
                "PUT",
                "/api/meetings/9999",
                json!({"location": "Room"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests deleting a meeting removes it from the user's list
    #[tokio::test]
    async fn it_deletes_a_meeting() {
        let test = test_app(StubCalendar::new(confirmed())).await;
        let meeting_id = seed_meeting(&test.db, 1, "Room").await;

        let response = test
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/meetings/{}", meeting_id))
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Meeting deleted");

        let response = test
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/meetings/user/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body, json!([]));

        let response = test
            .app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/meetings/{}", meeting_id))
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    /// Tests listing meetings only returns the requested user's meetings
    #[tokio::test]
    async fn it_lists_meetings_by_user() {
        let test = test_app(StubCalendar::new(confirmed())).await;
        seed_meeting(&test.db, 1, "Room 1").await;
        seed_meeting(&test.db, 1, "Room 2").await;
        seed_meeting(&test.db, 2, "Room 3").await;

        let response = test
            .app
            .oneshot(
                Request::builder()
                    .uri("/api/meetings/user/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        let locations: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["location"].as_str().unwrap())
            .collect();
        assert_eq!(locations, vec!["Room 1", "Room 2"]);
    }
}
