//! HTTP API integration tests, run against the router with a scripted
//! model provider so no network access is needed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use snapquiz::groq::models::{ChatResponse, Choice, ResponseMessage};
use snapquiz::groq::{ChatProvider, ChatRequest, GroqError, GroqModel};
use snapquiz::pipeline::{Pipeline, PipelineSettings};
use snapquiz::server;

/// Provider that plays back a fixed sequence of results
struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<ChatResponse, GroqError>>>,
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, GroqError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted provider ran out of responses")
    }
}

fn text_response(text: &str) -> Result<ChatResponse, GroqError> {
    Ok(ChatResponse {
        choices: vec![Choice {
            message: ResponseMessage { content: Some(text.to_string()) },
            finish_reason: Some("stop".to_string()),
        }],
        usage: None,
    })
}

fn app(responses: Vec<Result<ChatResponse, GroqError>>) -> Router {
    let provider = Arc::new(ScriptedProvider { responses: Mutex::new(responses.into()) });
    let settings = PipelineSettings {
        vision_model: GroqModel::Llama4Scout,
        logic_model: GroqModel::Llama33Versatile,
        max_tokens: 4096,
        temperature: 0.4,
        max_retries: 0,
        retry_backoff_ms: 1,
    };
    server::router(Arc::new(Pipeline::new(provider, settings)), "vercel.app")
}

async fn post_generate(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::post("/api/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn valid_body(mode: &str) -> Value {
    json!({ "image": "aGVsbG8=", "mimeType": "image/png", "mode": mode })
}

#[tokio::test]
async fn generate_rejects_missing_mode() {
    let body = json!({ "image": "aGVsbG8=", "mimeType": "image/png" });
    let (status, value) = post_generate(app(vec![]), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "Missing required fields: image, mimeType, mode");
}

#[tokio::test]
async fn generate_rejects_unknown_mode() {
    let (status, value) = post_generate(app(vec![]), valid_body("bogus")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(value["error"], "mode must be \"mcq\" or \"flashcard\"");
}

#[tokio::test]
async fn empty_extraction_is_unprocessable() {
    let (status, value) = post_generate(app(vec![text_response("  \n ")]), valid_body("mcq")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(value["error"].as_str().unwrap().contains("extract text"));
}

#[tokio::test]
async fn malformed_model_json_is_a_server_error() {
    let responses = vec![
        text_response("page text"),
        text_response("Here are your questions! 1) ..."),
    ];
    let (status, value) = post_generate(app(responses), valid_body("mcq")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(value["error"].as_str().unwrap().contains("malformed JSON"));
}

#[tokio::test]
async fn upstream_failure_is_a_server_error() {
    let responses = vec![Err(GroqError::ApiError {
        status: 401,
        message: "Invalid API key".to_string(),
    })];
    let (status, value) = post_generate(app(responses), valid_body("mcq")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(value["error"].as_str().unwrap().contains("Invalid API key"));
}

#[tokio::test]
async fn mcq_end_to_end_returns_a_shuffled_permutation() {
    let supplied = ["A. x", "B. y", "C. z", "D. w"];
    let responses = vec![
        text_response("Chapter 1: Cells."),
        text_response(
            r#"{"questions":[{"question":"Q1","options":["A. x","B. y","C. z","D. w"],"answer":"B"}]}"#,
        ),
    ];
    let (status, value) = post_generate(app(responses), valid_body("mcq")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["mode"], "mcq");
    assert!(value["extractedTextLength"].as_u64().unwrap() > 0);

    let item = &value["data"][0];
    let answer = item["answer"].as_str().unwrap();
    assert!(["A", "B", "C", "D"].contains(&answer));

    // Options must be a permutation of the supplied texts, and the
    // answer letter must still point at the originally-correct text.
    let mut options: Vec<&str> =
        item["options"].as_array().unwrap().iter().map(|o| o.as_str().unwrap()).collect();
    let correct_index = (answer.as_bytes()[0] - b'A') as usize;
    assert_eq!(options[correct_index], "B. y");
    options.sort_unstable();
    let mut expected = supplied.to_vec();
    expected.sort_unstable();
    assert_eq!(options, expected);
}

#[tokio::test]
async fn flashcard_end_to_end_passes_items_through() {
    let responses = vec![
        text_response("page text"),
        text_response(r#"{"flashcards":[{"front":"Mitochondria","back":"Powerhouse"}]}"#),
    ];
    let (status, value) = post_generate(app(responses), valid_body("flashcard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["mode"], "flashcard");
    assert_eq!(value["data"][0]["front"], "Mitochondria");
    assert_eq!(value["data"][0]["back"], "Powerhouse");
}

#[tokio::test]
async fn health_reports_ok_with_a_timestamp() {
    let response = app(vec![])
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
    // RFC 3339 timestamps parse back
    assert!(
        chrono::DateTime::parse_from_rfc3339(value["time"].as_str().unwrap()).is_ok()
    );
}

#[tokio::test]
async fn cors_admits_localhost_and_trusted_subdomains() {
    for origin in ["http://localhost:5173", "https://snapquiz.vercel.app"] {
        let response = app(vec![])
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let allowed = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok());
        assert_eq!(allowed, Some(origin), "origin {} should be admitted", origin);
    }
}

#[tokio::test]
async fn cors_rejects_unknown_origins() {
    let response = app(vec![])
        .oneshot(
            Request::get("/health")
                .header(header::ORIGIN, "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
