//! Mock API tests for the maildesk client.
//!
//! These use wiremock to simulate the backend, covering the happy path plus
//! end-to-end retry behavior: a 503 burst that recovers, a 404 that must not
//! be retried, connection failures, and per-attempt timeouts. Backoff factors
//! are kept tiny because these tests run against real sockets.

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use maildesk::error::ApiError;
use maildesk::retry::notify::RetryNotifier;
use maildesk::types::EmailUpdate;
use maildesk::{ApiConfig, MaildeskClient, RetryPolicy};

#[derive(Default)]
struct RecordingNotifier {
    warnings: Mutex<Vec<u32>>,
    errors: Mutex<Vec<u32>>,
}

impl RetryNotifier for RecordingNotifier {
    fn warn(&self, attempt: u32, _delay: Duration, _reason: &str) {
        self.warnings.lock().unwrap().push(attempt);
    }

    fn error(&self, attempts: u32, _reason: &str) {
        self.errors.lock().unwrap().push(attempts);
    }
}

fn sample_email(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "message_id": format!("<msg-{id}@mail>"),
        "sender": "customer@example.com",
        "recipient": "support@example.com",
        "subject": "Cannot log in",
        "body": "My password reset link never arrives.",
        "date": "2024-05-01T09:30:00",
        "sentiment": "negative",
        "sentiment_score": -0.62,
        "urgency": 4,
        "category": "account",
        "extracted_info": {"order_id": null},
        "is_processed": true,
        "ai_response": "Hi, sorry about the trouble...",
        "is_response_sent": false,
        "created_at": "2024-05-01T09:30:05",
        "updated_at": "2024-05-01T09:31:00"
    })
}

fn fast_client(server: &MockServer, max_retries: u32) -> (MaildeskClient, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let client = MaildeskClient::new(ApiConfig::new(server.uri()))
        .with_policy(
            RetryPolicy::new()
                .with_max_retries(max_retries)
                .with_backoff_factor(0.01)
                .with_timeout(5.0),
        )
        .with_notifier(notifier.clone());
    (client, notifier)
}

#[tokio::test]
async fn list_emails_returns_typed_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails/"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_email(1)])))
        .mount(&server)
        .await;

    let (client, notifier) = fast_client(&server, 3);
    let emails = client.list_emails(0, 50).await.unwrap();

    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].sender, "customer@example.com");
    assert_eq!(emails[0].urgency, Some(4));
    assert!(notifier.warnings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn server_errors_are_retried_until_the_backend_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails/7"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream restarting"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/emails/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_email(7)))
        .expect(1)
        .mount(&server)
        .await;

    let (client, notifier) = fast_client(&server, 3);
    let email = client.get_email(7).await.unwrap();

    assert_eq!(email.id, 7);
    assert_eq!(*notifier.warnings.lock().unwrap(), vec![0, 1]);
    assert!(notifier.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn client_errors_are_not_retried_and_carry_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emails/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("email 999 not found"))
        .expect(1)
        .mount(&server)
        .await;

    let (client, notifier) = fast_client(&server, 3);
    let error = client.get_email(999).await.unwrap_err();

    match &error {
        ApiError::ClientStatus { code, message, .. } => {
            assert_eq!(*code, 404);
            assert!(message.contains("email 999 not found"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
    assert_eq!(error.retry_count(), 0);
    assert!(notifier.warnings.lock().unwrap().is_empty());
    assert_eq!(*notifier.errors.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn connection_refused_exhausts_the_budget() {
    // Port 1 on localhost is never bound in the test environment.
    let notifier = Arc::new(RecordingNotifier::default());
    let client = MaildeskClient::new(ApiConfig::new("http://127.0.0.1:1"))
        .with_policy(
            RetryPolicy::new()
                .with_max_retries(1)
                .with_backoff_factor(0.01)
                .with_timeout(2.0),
        )
        .with_notifier(notifier.clone());

    let error = client.list_emails(0, 10).await.unwrap_err();

    assert!(matches!(error, ApiError::Connection { .. }));
    assert_eq!(error.retry_count(), 1);
    assert_eq!(*notifier.warnings.lock().unwrap(), vec![0]);
    assert_eq!(*notifier.errors.lock().unwrap(), vec![2]);
}

#[tokio::test]
async fn slow_responses_classify_as_timeouts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/analytics/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "total_emails": 0,
                    "processed_emails": 0,
                    "pending_emails": 0,
                    "sentiment_distribution": {},
                    "urgency_distribution": {},
                    "category_distribution": {},
                    "emails_last_24h": 0
                }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let notifier = Arc::new(RecordingNotifier::default());
    let client = MaildeskClient::new(ApiConfig::new(server.uri()))
        .with_policy(
            RetryPolicy::new()
                .with_max_retries(0)
                .with_timeout(0.05),
        )
        .with_notifier(notifier.clone());

    let error = client.analytics().await.unwrap_err();
    assert!(matches!(error, ApiError::Timeout { .. }));
    assert_eq!(error.retry_count(), 0);
    assert_eq!(*notifier.errors.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn update_email_sends_only_the_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/emails/7"))
        .and(body_json(json!({"ai_response": "Revised reply text."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_email(7)))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _notifier) = fast_client(&server, 0);
    let update = EmailUpdate::ai_response("Revised reply text.");
    let email = client.update_email(7, &update).await.unwrap();
    assert_eq!(email.id, 7);
}

#[tokio::test]
async fn trigger_ingest_reads_the_status_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/fetch-emails/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Processed 3 new emails",
            "count": 3
        })))
        .mount(&server)
        .await;

    let (client, _notifier) = fast_client(&server, 0);
    let status = client.trigger_ingest().await.unwrap();
    assert_eq!(status.status, "success");
    assert_eq!(status.count, 3);
}
