use aerodesk_api::{app, AppState};
use aerodesk_store::app_config::{
    AuthConfig, Config, NotificationConfig, ProviderConfig, ServerConfig, SessionConfig,
    StorageConfig,
};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

const OFFERS: &str = r#"
{
    "data": [{
        "id": "1",
        "validatingAirlineCodes": ["TP"],
        "itineraries": [{"duration": "PT1H50M", "segments": [{
            "departure": {"iataCode": "LIS", "terminal": "1", "at": "2025-03-14T07:00:00"},
            "arrival": {"iataCode": "FNC", "at": "2025-03-14T08:50:00"},
            "carrierCode": "TP", "number": "1689",
            "aircraft": {"code": "320"}, "duration": "PT1H50M"
        }]}],
        "price": {"currency": "EUR", "total": "89.90", "grandTotal": "89.90"}
    }],
    "dictionaries": {"carriers": {"TP": "TAP PORTUGAL"}, "aircraft": {"320": "AIRBUS A320"}}
}
"#;

fn config(dir: &Path, session_ttl_seconds: u64) -> Config {
    Config {
        server: ServerConfig { port: 0 },
        storage: StorageConfig {
            data_dir: dir.to_path_buf(),
            bookings_file: "bookings.jsonl".to_string(),
            users_file: "users.json".to_string(),
            history_file: "history.json".to_string(),
        },
        auth: AuthConfig {
            jwt_secret: "integration-secret".to_string(),
            jwt_expiration_seconds: 3600,
        },
        provider: ProviderConfig {
            fixture_path: dir.join("offers.json"),
        },
        notification: NotificationConfig {
            sender: "noreply@aerodesk.test".to_string(),
        },
        sessions: SessionConfig {
            ttl_seconds: session_ttl_seconds,
        },
    }
}

fn setup_with_ttl(session_ttl_seconds: u64) -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("offers.json"), OFFERS).unwrap();
    let router = app(AppState::from_config(&config(dir.path(), session_ttl_seconds)));
    (router, dir)
}

fn setup() -> (Router, TempDir) {
    setup_with_ttl(900)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn sign_up(app: &Router, email: &str) -> String {
    let creds = json!({"email": email, "password": "s3cret!"});
    let (status, _) = send(app, Method::POST, "/v1/auth/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, Method::POST, "/v1/auth/login", None, Some(creds)).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn find_offer(app: &Router, token: &str) -> Value {
    let search = json!({
        "origin": "LIS - Lisbon",
        "destination": "FNC",
        "departure_date": "2025-03-14",
        "passengers": 2
    });
    let (status, body) =
        send(app, Method::POST, "/v1/flights/search", Some(token), Some(search)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    body["data"][0].clone()
}

async fn open_session(app: &Router, token: &str, offer: &Value, passengers: u32) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/v1/sessions",
        Some(token),
        Some(json!({"flight": offer, "passengers": passengers})),
    )
    .await
}

#[tokio::test]
async fn test_authentication_flow() {
    let (app, _dir) = setup();

    let creds = json!({"email": "Joana@Example.com", "password": "s3cret!"});
    let (status, body) =
        send(&app, Method::POST, "/v1/auth/register", None, Some(creds.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "joana@example.com");

    let (status, _) = send(&app, Method::POST, "/v1/auth/register", None, Some(creds)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let wrong = json!({"email": "joana@example.com", "password": "nope"});
    let (status, _) = send(&app, Method::POST, "/v1/auth/login", None, Some(wrong)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/v1/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/v1/bookings", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_to_booking_flow() {
    let (app, _dir) = setup();
    let token = sign_up(&app, "joana@example.com").await;
    let offer = find_offer(&app, &token).await;

    let (status, session) = open_session(&app, &token, &offer, 2).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["state"], "OPEN");
    assert_eq!(session["available"], 120);
    assert_eq!(session["flight"]["flight_number"], "TP 1689");
    let id = session["id"].as_str().unwrap().to_string();

    for seat in ["1A", "1B", "1C"] {
        send(&app, Method::POST, &format!("/v1/sessions/{}/seats/{}", id, seat), Some(token.as_str()), None).await;
    }
    let (_, view) = send(&app, Method::GET, &format!("/v1/sessions/{}", id), Some(token.as_str()), None).await;
    // the third pick is ignored once the party is seated
    assert_eq!(view["selected"], json!(["1A", "1B"]));
    assert_eq!(view["remaining"], 0);

    let passengers = json!({"passengers": [
        {"name": "Joana", "email": "joana@example.com"},
        {"name": "Rui", "email": "rui@example.com"}
    ]});
    let booking_uri = format!("/v1/sessions/{}/booking", id);

    let (status, _) =
        send(&app, Method::POST, &booking_uri, Some(token.as_str()), Some(passengers.clone())).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, view) =
        send(&app, Method::POST, &format!("/v1/sessions/{}/confirm", id), Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "CONFIRMED");

    let bad = json!({"passengers": [
        {"name": "Joana", "email": "bad-email"},
        {"name": "Rui", "email": "rui@example.com"}
    ]});
    let (status, body) = send(&app, Method::POST, &booking_uri, Some(token.as_str()), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("bad-email"));

    let (status, body) = send(&app, Method::POST, &booking_uri, Some(token.as_str()), Some(passengers)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["booking"]["seats"], json!(["1A", "1B"]));
    assert_eq!(body["booking"]["passengers"][1]["seat"], "1B");
    let notifications = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n["delivered"] == true));

    // committed sessions are gone
    let (status, _) = send(&app, Method::GET, &format!("/v1/sessions/{}", id), Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, bookings) = send(&app, Method::GET, "/v1/bookings", Some(token.as_str()), None).await;
    assert_eq!(bookings.as_array().unwrap().len(), 1);

    let (_, history) = send(&app, Method::GET, "/v1/history", Some(token.as_str()), None).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["type"], "search");
    assert_eq!(history[0]["summary"], "From LIS to FNC | Passengers: 2 | Max Price: N/A");
    assert_eq!(history[1]["type"], "booking");

    // another customer sees the seats as taken
    let other = sign_up(&app, "rui@example.com").await;
    let (_, session) = open_session(&app, &other, &offer, 1).await;
    assert_eq!(session["available"], 118);
    let second = session["id"].as_str().unwrap();
    let (_, view) = send(&app, Method::POST, &format!("/v1/sessions/{}/seats/1A", second), Some(other.as_str()), None).await;
    assert_eq!(view["selected"], json!([]));

    let (_, theirs) = send(&app, Method::GET, "/v1/bookings", Some(other.as_str()), None).await;
    assert!(theirs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sessions_belong_to_their_owner() {
    let (app, _dir) = setup();
    let owner = sign_up(&app, "joana@example.com").await;
    let intruder = sign_up(&app, "rui@example.com").await;
    let offer = find_offer(&app, &owner).await;

    let (_, session) = open_session(&app, &owner, &offer, 1).await;
    let uri = format!("/v1/sessions/{}", session["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, Some(intruder.as_str()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(intruder.as_str()), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, view) = send(&app, Method::DELETE, &uri, Some(owner.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "DISCARDED");
    let (status, _) = send(&app, Method::GET, &uri, Some(owner.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_requests_are_rejected() {
    let (app, _dir) = setup();
    let token = sign_up(&app, "joana@example.com").await;
    let offer = find_offer(&app, &token).await;

    let (status, _) = open_session(&app, &token, &offer, 0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = open_session(&app, &token, &offer, 10).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, session) = open_session(&app, &token, &offer, 1).await;
    let id = session["id"].as_str().unwrap();
    let (status, _) = send(&app, Method::POST, &format!("/v1/sessions/{}/seats/21A", id), Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, &format!("/v1/sessions/{}/confirm", id), Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let same_route = json!({
        "origin": "LIS",
        "destination": "LIS",
        "departure_date": "2025-03-14",
        "passengers": 1
    });
    let (status, _) = send(&app, Method::POST, "/v1/flights/search", Some(token.as_str()), Some(same_route)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let endless = json!({
        "origin": "LIS",
        "destination": "FNC",
        "departure_date": "2025-03-14",
        "passengers": 1,
        "filters": {"max_duration_hours": 4294967295u32}
    });
    let (status, _) = send(&app, Method::POST, "/v1/flights/search", Some(token.as_str()), Some(endless)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expired_sessions_are_dropped() {
    // sessions expire the moment they open
    let (app, _dir) = setup_with_ttl(0);
    let token = sign_up(&app, "joana@example.com").await;
    let offer = find_offer(&app, &token).await;

    let (status, session) = open_session(&app, &token, &offer, 1).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = session["id"].as_str().unwrap();

    let (status, _) = send(&app, Method::GET, &format!("/v1/sessions/{}", id), Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::POST, &format!("/v1/sessions/{}/seats/1A", id), Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_live_sessions_report_their_expiry() {
    let (app, _dir) = setup();
    let token = sign_up(&app, "joana@example.com").await;
    let offer = find_offer(&app, &token).await;

    let (_, session) = open_session(&app, &token, &offer, 1).await;
    let expires_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(session["expires_at"].clone()).unwrap();
    assert!(expires_at > chrono::Utc::now());

    let uri = format!("/v1/sessions/{}", session["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::GET, &uri, Some(token.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
}
