#![allow(clippy::unwrap_used)]
// Integration tests for `CloudClient` using wiremock.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pmax_api::{ArmCommand, CloudClient, Credentials, Error, PartitionState, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

fn test_credentials() -> Credentials {
    Credentials {
        email: "user@example.com".into(),
        password: "hunter2".to_string().into(),
        app_id: "11111111-2222-3333-4444-555555555555".into(),
        user_code: "1234".to_string().into(),
        panel_serial: "1B7EEB".into(),
    }
}

async fn setup() -> (MockServer, CloudClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let transport = TransportConfig {
        timeout: Duration::from_secs(5),
        retry_attempts: 3,
        retry_backoff: Duration::from_millis(10),
    };
    let client = CloudClient::new(base_url, test_credentials(), &transport).unwrap();
    (server, client)
}

/// Mount both login stages, returning fixed tokens.
async fn mount_login(server: &MockServer, expected_logins: u64) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_json(json!({
            "email": "user@example.com",
            "password": "hunter2",
            "app_id": "11111111-2222-3333-4444-555555555555",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user_token": "tok-user" })))
        .expect(expected_logins)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/panel/login"))
        .and(header("User-Token", "tok-user"))
        .and(body_json(json!({
            "user_code": "1234",
            "app_type": "com.visonic.PowerMaxApp",
            "app_id": "11111111-2222-3333-4444-555555555555",
            "panel_serial": "1B7EEB",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "session_token": "tok-session" })),
        )
        .expect(expected_logins)
        .mount(server)
        .await;
}

// ── Login tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn login_success_stores_session() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    client.login().await.unwrap();
    assert!(client.has_session().await);
}

#[tokio::test]
async fn first_stage_rejection_leaves_no_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.has_session().await);
}

#[tokio::test]
async fn second_stage_rejection_discards_user_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user_token": "tok-user" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/panel/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.login().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    // Both tokens gone, not just the second.
    assert!(!client.has_session().await);
}

#[tokio::test]
async fn verify_credentials_hits_only_login_endpoints() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    client.verify_credentials().await.unwrap();
    assert!(client.has_session().await);
    // The expect(1) guards on the login mocks verify no extra calls
    // when the server is dropped.
}

// ── Request primitive tests ─────────────────────────────────────────

#[tokio::test]
async fn request_without_session_logs_in_exactly_once() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header("User-Token", "tok-user"))
        .and(header("Session-Token", "tok-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "connected": true,
            "partitions": [{ "state": "DISARM", "ready": true }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.status().await.unwrap();
    assert_eq!(status.connected, Some(true));
    let partition = status.partition().unwrap();
    assert_eq!(partition.state, Some(PartitionState::Disarm));
    assert_eq!(partition.ready, Some(true));
}

#[tokio::test]
async fn session_is_reused_across_requests() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "connected": true })))
        .expect(2)
        .mount(&server)
        .await;

    client.status().await.unwrap();
    client.status().await.unwrap();
}

#[tokio::test]
async fn three_rejections_exhaust_retries_without_a_fourth_attempt() {
    let (server, client) = setup().await;
    // Tokens are cleared after every failed attempt, so each of the
    // three attempts re-authenticates first.
    mount_login(&server, 3).await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(3)
        .mount(&server)
        .await;

    let result = client.status().await;
    match result {
        Err(Error::RetriesExhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(
                matches!(*last, Error::Api { status: 502, .. }),
                "expected Api 502 as final failure, got: {last:?}"
            );
        }
        other => panic!("expected RetriesExhausted, got: {other:?}"),
    }
    assert!(!client.has_session().await);
}

#[tokio::test]
async fn malformed_body_consumes_attempts_like_a_rejection() {
    // The original mobile client bailed out on the first transport or
    // decode failure while retrying HTTP rejections; this client
    // treats both the same way.
    let (server, client) = setup().await;
    mount_login(&server, 3).await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(3)
        .mount(&server)
        .await;

    let result = client.status().await;
    match result {
        Err(Error::RetriesExhausted { attempts, last }) => {
            assert_eq!(attempts, 3);
            assert!(
                matches!(*last, Error::Deserialization { .. }),
                "expected Deserialization as final failure, got: {last:?}"
            );
        }
        other => panic!("expected RetriesExhausted, got: {other:?}"),
    }
}

#[tokio::test]
async fn login_failure_propagates_without_request_retries() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    // The status endpoint must never be reached.
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.status().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Endpoint tests ──────────────────────────────────────────────────

#[tokio::test]
async fn set_state_sends_vendor_payload() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/set_state"))
        .and(body_json(json!({ "partition": -1, "state": "AWAY" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "process_token": "proc-1" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client.set_state(ArmCommand::Away).await.unwrap();
    assert_eq!(resp.process_token.as_deref(), Some("proc-1"));
}

#[tokio::test]
async fn set_state_tolerates_empty_response() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("POST"))
        .and(path("/set_state"))
        .and(body_json(json!({ "partition": -1, "state": "DISARM" })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let resp = client.set_state(ArmCommand::Disarm).await.unwrap();
    assert_eq!(resp.process_token, None);
}

#[tokio::test]
async fn panel_info_decodes_model_and_serial() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/panel_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "PowerMaster 360R",
            "serial": "1B7EEB",
        })))
        .mount(&server)
        .await;

    let info = client.panel_info().await.unwrap();
    assert_eq!(info.display_name().as_deref(), Some("PowerMaster 360R 1B7EEB"));
}

#[tokio::test]
async fn events_decode_with_extra_fields() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "label": "ARM", "name": "Anna", "datetime": "2024-06-15 10:30:00", "video": false },
            { "label": "ALERT" },
        ])))
        .mount(&server)
        .await;

    let events = client.events().await.unwrap();
    assert_eq!(events.len(), 2);
    assert!(events[0].is_arm_change());
    assert_eq!(events[0].name.as_deref(), Some("Anna"));
    assert!(!events[1].is_arm_change());
    assert_eq!(events[1].name, None);
}

#[tokio::test]
async fn devices_decode_and_filter_door_contacts() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Front Door", "subtype": "CONTACT", "status": "on" },
            { "id": 2, "name": "Hallway", "subtype": "MOTION_CAMERA" },
            { "id": 3, "name": "Back Door", "subtype": "CONTACT", "status": "off" },
        ])))
        .mount(&server)
        .await;

    let devices = client.devices().await.unwrap();
    let doors: Vec<_> = devices.iter().filter(|d| d.is_door_contact()).collect();
    assert_eq!(doors.len(), 2);
    assert!(doors[0].is_open());
    assert!(!doors[1].is_open());
}

#[tokio::test]
async fn status_with_missing_keys_decodes_to_none() {
    let (server, client) = setup().await;
    mount_login(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "partitions": [{ "state": "AWAY" }],
        })))
        .mount(&server)
        .await;

    let status = client.status().await.unwrap();
    assert_eq!(status.connected, None);
    let partition = status.partition().unwrap();
    assert_eq!(partition.state, Some(PartitionState::Away));
    assert_eq!(partition.status, None);
    assert_eq!(partition.ready, None);
}
