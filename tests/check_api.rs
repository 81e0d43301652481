//! End-to-end tests for the rate-limit API.

use std::time::Duration;

use rate_limiter::{HttpServer, RateLimiterConfig};
use serde_json::{json, Value};

/// Boot a server on a loopback port and return its base URL.
async fn spawn_server(config: RateLimiterConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_check_allows_valid_request_and_echoes_quota() {
    let base = spawn_server(RateLimiterConfig::default()).await;

    let res = client()
        .post(format!("{base}/rate_limit/check"))
        .json(&json!({ "identifier": "user-1", "type": "USER_ID" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["X-RateLimit-Limit"], "100");
    assert_eq!(res.headers()["X-RateLimit-Remaining"], "100");
    assert!(res.headers().contains_key("X-RateLimit-Reset"));
    assert!(!res.headers().contains_key("Retry-After"));

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["allowed"], true);
    assert_eq!(body["message"], "Request allowed");
    assert_eq!(body["rate_limit_limit"], 100);
    assert_eq!(body["rate_limit_remaining"], 100);
    assert!(body["rate_limit_reset"].as_u64().unwrap() > 0);
    assert!(body.get("retry_after").is_none());
}

#[tokio::test]
async fn test_check_rejects_malformed_user_id() {
    let base = spawn_server(RateLimiterConfig::default()).await;

    let res = client()
        .post(format!("{base}/rate_limit/check"))
        .json(&json!({ "identifier": "user@123", "type": "USER_ID" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["field"], "identifier");
    assert_eq!(body["message"], "Invalid user ID format");
}

#[tokio::test]
async fn test_global_type_accepts_any_identifier() {
    let base = spawn_server(RateLimiterConfig::default()).await;

    let res = client()
        .post(format!("{base}/rate_limit/check"))
        .json(&json!({ "identifier": "anything", "type": "GLOBAL" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_check_rejects_missing_fields() {
    let base = spawn_server(RateLimiterConfig::default()).await;

    let res = client()
        .post(format!("{base}/rate_limit/check"))
        .json(&json!({ "identifier": "user-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["field"], "type");

    let res = client()
        .post(format!("{base}/rate_limit/check"))
        .header("Content-Type", "application/json")
        .body("not json at all")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn test_config_roundtrip_and_rejected_update() {
    let mut config = RateLimiterConfig::default();
    config.default_limits.requests_per_minute = 60;
    let base = spawn_server(config).await;

    let body: Value = client()
        .get(format!("{base}/rate_limit/config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["algorithm"], "TOKEN_BUCKET");
    assert_eq!(body["requestsPerMinute"], 60);
    assert_eq!(body["burstSize"], 10);
    assert_eq!(body["enabled"], true);

    // A valid update is acknowledged...
    let res = client()
        .post(format!("{base}/rate_limit/config"))
        .json(&json!({
            "algorithm": "FIXED_WINDOW",
            "requestsPerMinute": 500,
            "burstSize": 50,
            "enabled": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Configuration updated successfully");

    // ...an out-of-range one is rejected...
    let res = client()
        .post(format!("{base}/rate_limit/config"))
        .json(&json!({
            "algorithm": "TOKEN_BUCKET",
            "requestsPerMinute": -1,
            "burstSize": 10,
            "enabled": true
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["field"], "requestsPerMinute");

    // ...and neither changes what the next read returns
    let body: Value = client()
        .get(format!("{base}/rate_limit/config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["requestsPerMinute"], 60);
    assert_eq!(body["algorithm"], "TOKEN_BUCKET");
}

#[tokio::test]
async fn test_health_endpoint() {
    let base = spawn_server(RateLimiterConfig::default()).await;

    let res = client()
        .get(format!("{base}/rate_limit/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "UP");
    assert_eq!(body["service"], "rate-limiter");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_correlation_id_propagation() {
    let base = spawn_server(RateLimiterConfig::default()).await;

    // A caller-supplied id is echoed back
    let res = client()
        .get(format!("{base}/rate_limit/health"))
        .header("X-Correlation-ID", "test-id-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["X-Correlation-ID"], "test-id-42");

    // Otherwise one is minted
    let res = client()
        .get(format!("{base}/rate_limit/health"))
        .send()
        .await
        .unwrap();
    assert!(!res.headers()["X-Correlation-ID"].is_empty());
}
