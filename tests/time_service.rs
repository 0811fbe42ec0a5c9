//! Integration tests for the time service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use time_greeter::time::{FixedClock, TimeResponse};
use time_greeter::{HttpServer, Shutdown};

mod common;

#[tokio::test]
async fn test_time_is_current_iso8601() {
    let shutdown = Shutdown::new();
    let config = common::test_config("http://localhost:3001");
    let addr = common::spawn_server(HttpServer::time(&config), &shutdown).await;

    let before = Utc::now();
    let res = common::client()
        .get(format!("http://{}/time", addr))
        .send()
        .await
        .expect("time service unreachable");
    let after = Utc::now();

    assert_eq!(res.status(), 200);
    assert!(res
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("application/json"));

    let body: TimeResponse = res.json().await.unwrap();
    let parsed = DateTime::parse_from_rfc3339(&body.time)
        .expect("time should be ISO-8601")
        .with_timezone(&Utc);
    assert!(body.time.ends_with('Z'));

    // Millisecond truncation can put the value just before `before`.
    let slack = chrono::Duration::milliseconds(5);
    assert!(parsed >= before - slack && parsed <= after + slack, "{} not in [{}, {}]", parsed, before, after);

    shutdown.trigger();
}

#[tokio::test]
async fn test_time_body_has_only_time_field() {
    let shutdown = Shutdown::new();
    let instant = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    let config = common::test_config("http://localhost:3001");
    let server = HttpServer::time_with_clock(&config, Arc::new(FixedClock(instant)));
    let addr = common::spawn_server(server, &shutdown).await;

    let body: Value = common::client()
        .get(format!("http://{}/time?ignored=1", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, serde_json::json!({ "time": "2026-10-19T12:00:00.000Z" }));

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_generated_or_echoed() {
    let shutdown = Shutdown::new();
    let config = common::test_config("http://localhost:3001");
    let addr = common::spawn_server(HttpServer::time(&config), &shutdown).await;
    let client = common::client();

    let res = client.get(format!("http://{}/time", addr)).send().await.unwrap();
    let generated = res.headers().get("x-request-id").expect("request id should be set");
    assert!(uuid::Uuid::parse_str(generated.to_str().unwrap()).is_ok());

    let res = client
        .get(format!("http://{}/time", addr))
        .header("x-request-id", "caller-chosen-id")
        .send()
        .await
        .unwrap();
    assert_eq!(
        res.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "caller-chosen-id"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let shutdown = Shutdown::new();
    let config = common::test_config("http://localhost:3001");
    let addr = common::spawn_server(HttpServer::time(&config), &shutdown).await;
    let client = common::client();

    let health: Value = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["service"], "time");

    let res = client.get(format!("http://{}/greet", addr)).send().await.unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("/greet"));

    shutdown.trigger();
}
