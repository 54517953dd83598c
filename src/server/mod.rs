//! HTTP API for the generation pipeline
//!
//! A single generation endpoint plus a health probe, behind a CORS layer
//! that admits localhost and subdomains of one trusted deployment host.
//! The backend holds no state across requests; each request owns its own
//! pipeline run.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info};

use crate::pipeline::{GenerateRequest, GenerateResponse, GeneratedItems, Pipeline, PipelineError};
use crate::quiz::shuffle_mcq;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    /// The generation pipeline (stateless; shared for its provider)
    pub pipeline: Arc<Pipeline>,
}

/// Error wrapped for the HTTP boundary: a taxonomy status plus the
/// message that becomes the `{error}` body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A 400 for requests that never reached the pipeline
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl From<PipelineError> for ApiError {
    /// 400 for client mistakes, 422 for unreadable images, 500 for
    /// upstream contract violations and everything else.
    fn from(err: PipelineError) -> Self {
        let status = match &err {
            PipelineError::MissingFields | PipelineError::InvalidMode => StatusCode::BAD_REQUEST,
            PipelineError::ExtractionFailed => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::MalformedAiOutput
            | PipelineError::NoValidItems
            | PipelineError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: err.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(error = %self.message, "generate request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the application router
pub fn router(pipeline: Arc<Pipeline>, trusted_origin_suffix: &str) -> Router {
    let state = AppState { pipeline };

    Router::new()
        .route("/api/generate", post(generate))
        .route("/health", get(health))
        .layer(cors_layer(trusted_origin_suffix))
        .with_state(state)
}

/// CORS policy: requests without an Origin header bypass CORS entirely;
/// browser requests are admitted from localhost and from any subdomain of
/// the trusted deployment host, and rejected otherwise.
fn cors_layer(trusted_origin_suffix: &str) -> CorsLayer {
    let suffix = format!(".{}", trusted_origin_suffix);

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| o.contains("localhost") || o.ends_with(&suffix))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// `POST /api/generate`
///
/// The body is taken as raw JSON and validated by hand so missing fields
/// and bad modes surface as the pipeline's own 400 responses rather than
/// the extractor's defaults. MCQ output is shuffled server-side so the
/// answer letter callers receive already reflects the final option order.
async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(body) = payload.map_err(|err| ApiError::bad_request(err.body_text()))?;
    let request = GenerateRequest::from_value(&body)?;
    let mut response = state.pipeline.generate(&request).await?;

    response.data = match response.data {
        GeneratedItems::Mcq(questions) => {
            let shuffled = shuffle_mcq(questions);
            if shuffled.is_empty() {
                return Err(PipelineError::NoValidItems.into());
            }
            GeneratedItems::Mcq(shuffled)
        }
        flashcards => flashcards,
    };

    Ok(Json(response))
}

/// `GET /health`
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Bind and serve the API until the process is stopped
pub async fn serve(app: Router, port: u16) -> anyhow::Result<()> {
    // Dual-stack listener: IPv6 any-address accepts IPv4 too
    let addr: SocketAddr = format!("[::]:{}", port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}
