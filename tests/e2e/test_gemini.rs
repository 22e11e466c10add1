use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use incdrops_backend::infrastructure::repositories::{
    GeminiIdeaOracleRepository, GenerationConfig, IdeaOracleRepository,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Default)]
struct Captured {
    call: Option<String>,
    key: Option<String>,
    body: Option<Value>,
}

struct MockGemini {
    status: StatusCode,
    delay: Duration,
    response: Value,
    captured: Mutex<Captured>,
}

async fn generate_content(
    State(mock): State<Arc<MockGemini>>,
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    {
        let mut captured = mock.captured.lock().unwrap();
        captured.call = Some(call);
        captured.key = query.get("key").cloned();
        captured.body = Some(body);
    }
    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }
    (mock.status, Json(mock.response.clone()))
}

/// Serve a canned Gemini answer and return its base URL
async fn start_mock(status: StatusCode, response: Value) -> (String, Arc<MockGemini>) {
    start_slow_mock(status, response, Duration::ZERO).await
}

async fn start_slow_mock(
    status: StatusCode,
    response: Value,
    delay: Duration,
) -> (String, Arc<MockGemini>) {
    let mock = Arc::new(MockGemini {
        status,
        delay,
        response,
        captured: Mutex::new(Captured::default()),
    });

    let app = Router::new()
        .route("/v1beta/models/:call", post(generate_content))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, mock)
}

fn oracle(base_url: String) -> GeminiIdeaOracleRepository {
    oracle_with_timeout(base_url, Duration::from_secs(5))
}

fn oracle_with_timeout(base_url: String, timeout: Duration) -> GeminiIdeaOracleRepository {
    GeminiIdeaOracleRepository::new(
        base_url,
        "gemini-test".to_string(),
        "test-key".to_string(),
        GenerationConfig::default(),
        timeout,
    )
    .unwrap()
}

#[tokio::test]
async fn it_should_return_the_first_candidate_text() {
    let (base_url, mock) = start_mock(
        StatusCode::OK,
        json!({
            "candidates": [
                {"content": {"parts": [{"text": "[{\"title\": \"From Gemini\"}]"}]}}
            ]
        }),
    )
    .await;

    let text = oracle(base_url).complete("Give me ideas").await.unwrap();

    assert_eq!(text, "[{\"title\": \"From Gemini\"}]");

    let captured = mock.captured.lock().unwrap();
    assert_eq!(captured.call.as_deref(), Some("gemini-test:generateContent"));
    assert_eq!(captured.key.as_deref(), Some("test-key"));

    let body = captured.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Give me ideas");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 750);
    assert!(body["generationConfig"].get("temperature").is_some());
}

#[tokio::test]
async fn it_should_fail_on_error_status() {
    let (base_url, _mock) = start_mock(
        StatusCode::SERVICE_UNAVAILABLE,
        json!({"error": {"message": "overloaded"}}),
    )
    .await;

    let error = oracle(base_url).complete("Give me ideas").await.unwrap_err();

    assert_eq!(error, "Gemini API error: 503");
}

#[tokio::test]
async fn it_should_fail_when_no_candidate_text_is_returned() {
    let (base_url, _mock) = start_mock(
        StatusCode::OK,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}),
    )
    .await;

    let error = oracle(base_url).complete("Give me ideas").await.unwrap_err();

    assert!(error.contains("no candidate text"));
}

#[tokio::test]
async fn it_should_fail_when_the_api_is_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = oracle(format!("http://{}/v1beta", addr))
        .complete("Give me ideas")
        .await
        .unwrap_err();

    assert!(error.starts_with("Gemini request failed"));
}

#[tokio::test]
async fn it_should_give_up_on_a_hung_api() {
    let (base_url, _mock) = start_slow_mock(
        StatusCode::OK,
        json!({"candidates": [{"content": {"parts": [{"text": "[]"}]}}]}),
        Duration::from_secs(10),
    )
    .await;

    let started = std::time::Instant::now();
    let error = oracle_with_timeout(base_url, Duration::from_millis(200))
        .complete("Give me ideas")
        .await
        .unwrap_err();

    assert!(error.starts_with("Gemini request failed"));
    assert!(started.elapsed() < Duration::from_secs(5));
}
