//! Dashboard loading, fallback and submission flow against a mock backend.

use civiclink_client::{
    submit, AuthGate, CivicClient, ClientConfig, ClientError, Dashboard, GateDecision, ListScope,
    LoadState, MemorySessionStore, RetryPolicy, SessionStore, View, FALLBACK_WARNING,
};
use civiclink_core::{Category, ComplaintDraft, ComplaintFilter, ComplaintId, Profile, Status, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn complaint_json(id: &str, status: &str, category: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Issue {}", id),
        "description": "Reported by a resident",
        "category": category,
        "location": "Main Street",
        "status": status,
        "priority": "MEDIUM",
        "upvotes": 1,
        "userEmail": "jane@example.com",
        "createdAt": "2024-05-01T10:15:30",
        "updatedAt": "2024-05-01T10:15:30"
    })
}

async fn signed_in_client(base_url: &str, config: Option<ClientConfig>) -> CivicClient {
    let store = Arc::new(MemorySessionStore::new());
    store
        .save_user(&Profile {
            id: UserId::new("user-1"),
            email: "jane@example.com".to_string(),
            full_name: "Jane Citizen".to_string(),
            phone: None,
        })
        .await
        .unwrap();

    let config = config.unwrap_or_else(|| ClientConfig::new(base_url));
    let client = CivicClient::new(config, store).unwrap();
    client.hydrate().await.unwrap();
    client
}

fn draft() -> ComplaintDraft {
    ComplaintDraft::new()
        .title("Overflowing Trash Bins")
        .description("Garbage bins in Central Park are overflowing")
        .category("waste")
        .location("Central Park entrance")
        .priority("LOW")
}

// =============================================================================
// Dashboard Tests
// =============================================================================

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn test_live_load_with_stats_and_filters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/complaints"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                complaint_json("1", "PENDING", "roads"),
                complaint_json("2", "RESOLVED", "water"),
                complaint_json("3", "PENDING", "water")
            ])))
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&format!("{}/api", mock_server.uri()), None).await;
        let mut dashboard = Dashboard::default();
        assert_eq!(dashboard.state(), LoadState::Loading);

        dashboard.load(&client, ListScope::All).await;
        assert_eq!(dashboard.state(), LoadState::Ready);
        assert!(dashboard.warning().is_none());

        dashboard.set_filter(ComplaintFilter::new().with_status(Status::Pending));
        let visible: Vec<_> = dashboard.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(visible, vec!["1", "3"]);

        // Stats ignore the active filter
        let stats = dashboard.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.resolved, 1);

        dashboard.set_filter(
            ComplaintFilter::new()
                .with_status(Status::Pending)
                .with_category(Category::Water),
        );
        assert_eq!(dashboard.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_sample_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/complaints"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&format!("{}/api", mock_server.uri()), None).await;
        let mut dashboard = Dashboard::new(Duration::from_millis(100));

        dashboard.load(&client, ListScope::All).await;

        assert_eq!(dashboard.state(), LoadState::Fallback);
        assert_eq!(dashboard.warning(), Some(FALLBACK_WARNING));
        assert_eq!(dashboard.complaints().len(), 2);
        assert!(dashboard
            .complaints()
            .iter()
            .all(|c| c.user_email.as_deref() == Some("jane@example.com")));
    }

    #[tokio::test]
    async fn test_unreachable_backend_falls_back() {
        let client = signed_in_client("http://127.0.0.1:1/api", None).await;
        let mut dashboard = Dashboard::default();

        dashboard.load(&client, ListScope::Mine).await;

        assert_eq!(dashboard.state(), LoadState::Fallback);
        assert_eq!(dashboard.complaints().len(), 2);
        assert_eq!(dashboard.stats().in_progress, 1);
    }

    #[tokio::test]
    async fn test_server_error_falls_back_and_recovers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/complaints"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/complaints"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                complaint_json("9", "REJECTED", "other")
            ])))
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&format!("{}/api", mock_server.uri()), None).await;
        let mut dashboard = Dashboard::default();

        dashboard.load(&client, ListScope::All).await;
        assert_eq!(dashboard.state(), LoadState::Fallback);

        dashboard.load(&client, ListScope::All).await;
        assert_eq!(dashboard.state(), LoadState::Ready);
        assert!(dashboard.warning().is_none());
        assert_eq!(dashboard.complaints()[0].id.as_str(), "9");
    }

    #[tokio::test]
    async fn test_upvote_in_fallback_mode_is_local() {
        let client = signed_in_client("http://127.0.0.1:1/api", None).await;
        let mut dashboard = Dashboard::default();
        dashboard.load(&client, ListScope::All).await;

        let id = ComplaintId::new("2");
        let before = dashboard.complaints()[1].upvotes;
        let updated = dashboard.upvote(&client, &id).await.unwrap();
        assert_eq!(updated.upvotes, before + 1);

        let missing = dashboard.upvote(&client, &ComplaintId::new("nope")).await;
        assert!(matches!(missing, Err(ClientError::UnknownComplaint(_))));
    }

    #[tokio::test]
    async fn test_upvote_merges_server_copy() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/complaints"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                complaint_json("1", "PENDING", "roads")
            ])))
            .mount(&mock_server)
            .await;

        let mut upvoted = complaint_json("1", "PENDING", "roads");
        upvoted["upvotes"] = serde_json::json!(2);

        Mock::given(method("PUT"))
            .and(path("/api/complaints/1/upvote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upvoted))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&format!("{}/api", mock_server.uri()), None).await;
        let mut dashboard = Dashboard::default();
        dashboard.load(&client, ListScope::All).await;

        let updated = dashboard
            .upvote(&client, &ComplaintId::new("1"))
            .await
            .unwrap();
        assert_eq!(updated.upvotes, 2);
    }
}

// =============================================================================
// Auth Gate Tests
// =============================================================================

mod gate {
    use super::*;

    #[tokio::test]
    async fn test_gate_follows_session() {
        let client = signed_in_client("http://127.0.0.1:1/api", None).await;
        assert_eq!(
            AuthGate::check(&client, View::ReportIssue).await,
            GateDecision::Render(View::ReportIssue)
        );

        client.logout().await.unwrap();
        assert_eq!(
            AuthGate::check(&client, View::ReportIssue).await,
            GateDecision::Redirect(View::Login)
        );
    }
}

// =============================================================================
// Submission Tests
// =============================================================================

mod submission {
    use super::*;

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/complaints"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&format!("{}/api", mock_server.uri()), None).await;
        let result = submit(&client, &draft().title(""), &RetryPolicy::default()).await;

        match result {
            Err(ClientError::Validation(e)) => assert!(e.to_string().contains("title")),
            other => panic!("Expected validation error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_server_receives_exactly_one_post() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/complaints"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(complaint_json("x", "PENDING", "waste"))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/api", mock_server.uri());
        let config = ClientConfig::new(&base_url).with_request_timeout(Duration::from_millis(100));
        let client = signed_in_client(&base_url, Some(config)).await;

        let policy = RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(10),
        };
        let result = submit(&client, &draft(), &policy).await;

        match result {
            Err(e @ ClientError::Timeout(_)) => {
                assert!(!e.is_retryable());
                assert!(
                    e.to_string().contains("may already have been filed"),
                    "outcome must be flagged as unknown, got: {}",
                    e
                );
            }
            other => panic!("Expected timeout, got: {:?}", other),
        }

        let posts = mock_server.received_requests().await.unwrap_or_default();
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_rejections_are_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/complaints"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "Invalid priority" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = signed_in_client(&format!("{}/api", mock_server.uri()), None).await;
        let err = submit(&client, &draft(), &RetryPolicy::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid priority");
    }

    #[tokio::test]
    async fn test_refused_connections_are_retried_then_surfaced() {
        let client = signed_in_client("http://127.0.0.1:1/api", None).await;

        let policy = RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(100),
        };
        let started = Instant::now();
        let result = submit(&client, &draft(), &policy).await;

        assert!(
            matches!(result, Err(ClientError::Network(_))),
            "failure must be surfaced, got: {:?}",
            result
        );
        // Two pauses between three attempts
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_dropped_connection_is_not_retried() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));

        let accepted = Arc::clone(&connections);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                accepted.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                // Hang up without answering
                drop(socket);
            }
        });

        let client = signed_in_client(&format!("http://{}/api", addr), None).await;
        let policy = RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(10),
        };
        let result = submit(&client, &draft(), &policy).await;

        match result {
            Err(e @ ClientError::ConnectionLost(_)) => {
                assert!(e.is_transport());
                assert!(e.to_string().contains("may already have been filed"));
            }
            other => panic!("Expected lost connection, got: {:?}", other),
        }
        assert_eq!(connections.load(Ordering::SeqCst), 1);
    }
}
