//! Two-stage generation pipeline: page image → transcribed text → items.
//!
//! Step 1 sends the image to a vision model with a fixed transcription
//! instruction. Step 2 sends the transcript to a text model with a
//! mode-specific system prompt and expects JSON back. The two calls are
//! strictly sequential: step 2 depends on step 1's output.
//!
//! ## Retry Strategy
//!
//! HTTP 429 / 5xx and transport failures are transient and retried with
//! exponential backoff (`retry_backoff_ms * 2^(attempt-1)`). Permanent
//! conditions — unreadable image, malformed model JSON, auth failures —
//! are never retried server-side; the caller decides whether to re-issue.

pub mod error;
pub mod normalize;
pub mod prompts;

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::time::{Duration, sleep};
use tracing::{debug, warn};

use crate::config::Config;
use crate::groq::models::data_url;
use crate::groq::{ChatMessage, ChatProvider, ChatRequest, ChatResponse, GroqModel};
use crate::quiz::{FlashcardItem, McqItem};

pub use error::PipelineError;

/// Which kind of study material to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Multiple-choice questions
    Mcq,
    /// Front/back flashcards
    Flashcard,
}

impl Mode {
    /// Noun used when asking the logic model for output
    fn item_kind(&self) -> &'static str {
        match self {
            Mode::Mcq => "MCQ questions",
            Mode::Flashcard => "flashcards",
        }
    }

    /// Mode-specific system prompt for the structured-generation step
    fn system_prompt(&self) -> &'static str {
        match self {
            Mode::Mcq => prompts::MCQ_SYSTEM_PROMPT,
            Mode::Flashcard => prompts::FLASHCARD_SYSTEM_PROMPT,
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcq" => Ok(Mode::Mcq),
            "flashcard" => Ok(Mode::Flashcard),
            other => Err(format!("unknown mode '{}': expected mcq or flashcard", other)),
        }
    }
}

/// Validated generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Base64-encoded image bytes, without a data-URL prefix
    pub image: String,
    /// MIME type of the image, e.g. `image/jpeg`
    pub mime_type: String,
    /// What to generate
    pub mode: Mode,
}

impl GenerateRequest {
    /// Validate a raw JSON request body.
    ///
    /// Fields are checked by hand (rather than derived deserialization) so
    /// a missing field and an unknown mode both surface as the pipeline's
    /// own 400-class errors, with the exact messages callers match on.
    pub fn from_value(body: &Value) -> Result<Self, PipelineError> {
        let image = body.get("image").and_then(Value::as_str).unwrap_or_default();
        let mime_type = body.get("mimeType").and_then(Value::as_str).unwrap_or_default();
        let mode = body.get("mode").and_then(Value::as_str).unwrap_or_default();

        if image.is_empty() || mime_type.is_empty() || mode.is_empty() {
            return Err(PipelineError::MissingFields);
        }

        let mode = Mode::from_str(mode).map_err(|_| PipelineError::InvalidMode)?;

        Ok(Self { image: image.to_string(), mime_type: mime_type.to_string(), mode })
    }
}

/// Generated item list, typed by mode
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GeneratedItems {
    /// MCQ mode output
    Mcq(Vec<McqItem>),
    /// Flashcard mode output
    Flashcards(Vec<FlashcardItem>),
}

impl GeneratedItems {
    /// Number of items generated
    pub fn len(&self) -> usize {
        match self {
            GeneratedItems::Mcq(items) => items.len(),
            GeneratedItems::Flashcards(items) => items.len(),
        }
    }

    /// Whether nothing usable was generated
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Successful pipeline output
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// Mode that was requested
    pub mode: Mode,
    /// Generated items
    pub data: GeneratedItems,
    /// Length of the transcribed source text (diagnostic only)
    #[serde(rename = "extractedTextLength")]
    pub extracted_text_length: usize,
}

/// Settings for one pipeline instance, derived from [`Config`]
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Vision-capable model for transcription
    pub vision_model: GroqModel,
    /// Text model for structured generation
    pub logic_model: GroqModel,
    /// Max tokens per upstream call
    pub max_tokens: u32,
    /// Temperature for the structured-generation step
    pub temperature: f32,
    /// Retries per upstream call for transient failures
    pub max_retries: u32,
    /// Base backoff in milliseconds, doubled per attempt
    pub retry_backoff_ms: u64,
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            vision_model: config.vision_model,
            logic_model: config.logic_model,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }
}

/// The two-stage generation pipeline
pub struct Pipeline {
    provider: Arc<dyn ChatProvider>,
    settings: PipelineSettings,
}

impl Pipeline {
    /// Create a pipeline over the given provider
    pub fn new(provider: Arc<dyn ChatProvider>, settings: PipelineSettings) -> Self {
        Self { provider, settings }
    }

    /// Run both stages and return the normalized item list.
    ///
    /// Holds no state between calls; each invocation makes exactly two
    /// sequential upstream calls (plus bounded retries).
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, PipelineError> {
        let text = self.extract_text(request).await?;
        debug!(chars = text.len(), "extracted page text");

        let raw = self.generate_structured(request.mode, &text).await?;
        let data = decode_items(request.mode, &raw)?;
        debug!(items = data.len(), "generated items");

        Ok(GenerateResponse {
            mode: request.mode,
            data,
            extracted_text_length: text.len(),
        })
    }

    /// Step 1: transcribe the page image via the vision model
    async fn extract_text(&self, request: &GenerateRequest) -> Result<String, PipelineError> {
        let url = data_url(&request.mime_type, &request.image);
        let messages = vec![ChatMessage::user_with_image(prompts::EXTRACTION_PROMPT, url)];

        let chat_request = ChatRequest::new(self.settings.vision_model, messages)
            .with_max_tokens(self.settings.max_tokens);

        let response = self.chat_with_retry(&chat_request, "extraction").await?;
        let text = response.first_text();

        if text.trim().is_empty() {
            return Err(PipelineError::ExtractionFailed);
        }
        Ok(text)
    }

    /// Step 2: turn the transcript into raw JSON via the logic model
    async fn generate_structured(&self, mode: Mode, text: &str) -> Result<String, PipelineError> {
        let messages = vec![
            ChatMessage::system(mode.system_prompt()),
            ChatMessage::user(prompts::generation_user_turn(text, mode.item_kind())),
        ];

        let chat_request = ChatRequest::new(self.settings.logic_model, messages)
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature)
            .with_json_output();

        let response = self.chat_with_retry(&chat_request, "generation").await?;
        Ok(response.first_text())
    }

    /// Issue one upstream call, retrying transient failures with backoff
    async fn chat_with_retry(
        &self,
        request: &ChatRequest,
        stage: &str,
    ) -> Result<ChatResponse, PipelineError> {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let backoff = self.settings.retry_backoff_ms * 2u64.pow(attempt - 1);
                warn!(stage, attempt, max = self.settings.max_retries, backoff_ms = backoff, "retrying upstream call");
                sleep(Duration::from_millis(backoff)).await;
            }

            match self.provider.chat(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.settings.max_retries => {
                    warn!(stage, attempt = attempt + 1, error = %e, "transient upstream failure");
                    attempt += 1;
                }
                Err(e) => return Err(PipelineError::Upstream(e)),
            }
        }
    }
}

/// Parse and normalize raw model output into typed items.
///
/// Individual elements that fail to decode are skipped rather than failing
/// the whole response; the pipeline trusts the prompt's schema only as far
/// as each element actually honours it.
fn decode_items(mode: Mode, raw: &str) -> Result<GeneratedItems, PipelineError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| PipelineError::MalformedAiOutput)?;
    let elements = normalize::unwrap_items(value).ok_or(PipelineError::MalformedAiOutput)?;

    let data = match mode {
        Mode::Mcq => GeneratedItems::Mcq(
            elements
                .into_iter()
                .filter_map(|v| serde_json::from_value::<McqItem>(v).ok())
                .collect(),
        ),
        Mode::Flashcard => GeneratedItems::Flashcards(
            elements
                .into_iter()
                .filter_map(|v| serde_json::from_value::<FlashcardItem>(v).ok())
                .collect(),
        ),
    };

    if data.is_empty() {
        return Err(PipelineError::NoValidItems);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groq::GroqError;
    use crate::groq::models::{Choice, ResponseMessage};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider that plays back a fixed sequence of results
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<ChatResponse, GroqError>>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<ChatResponse, GroqError>>) -> Arc<Self> {
            Arc::new(Self { responses: Mutex::new(responses.into()) })
        }
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

    fn text_response(text: &str) -> ChatResponse {
        ChatResponse {
            choices: vec![Choice {
                message: ResponseMessage { content: Some(text.to_string()) },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }

    fn settings() -> PipelineSettings {
        PipelineSettings {
            vision_model: GroqModel::Llama4Scout,
            logic_model: GroqModel::Llama33Versatile,
            max_tokens: 4096,
            temperature: 0.4,
            max_retries: 2,
            retry_backoff_ms: 1,
        }
    }

    fn mcq_request() -> GenerateRequest {
        GenerateRequest {
            image: "aGVsbG8=".to_string(),
            mime_type: "image/png".to_string(),
            mode: Mode::Mcq,
        }
    }

    #[test]
    fn request_validation_rejects_missing_fields() {
        let body = serde_json::json!({"image": "abc", "mode": "mcq"});
        assert!(matches!(
            GenerateRequest::from_value(&body),
            Err(PipelineError::MissingFields)
        ));
    }

    #[test]
    fn request_validation_rejects_unknown_mode() {
        let body = serde_json::json!({"image": "abc", "mimeType": "image/png", "mode": "bogus"});
        assert!(matches!(
            GenerateRequest::from_value(&body),
            Err(PipelineError::InvalidMode)
        ));
    }

    #[test]
    fn request_validation_accepts_both_modes() {
        for (mode, expected) in [("mcq", Mode::Mcq), ("flashcard", Mode::Flashcard)] {
            let body =
                serde_json::json!({"image": "abc", "mimeType": "image/png", "mode": mode});
            assert_eq!(GenerateRequest::from_value(&body).unwrap().mode, expected);
        }
    }

    #[tokio::test]
    async fn mcq_happy_path() {
        let provider = ScriptedProvider::new(vec![
            Ok(text_response("Chapter 1: Cells. The mitochondrion is the powerhouse.")),
            Ok(text_response(
                r#"{"questions":[{"question":"Q1","options":["A. x","B. y","C. z","D. w"],"answer":"B"}]}"#,
            )),
        ]);
        let pipeline = Pipeline::new(provider, settings());

        let response = pipeline.generate(&mcq_request()).await.unwrap();
        assert_eq!(response.mode, Mode::Mcq);
        assert_eq!(response.data.len(), 1);
        assert!(response.extracted_text_length > 0);
    }

    #[tokio::test]
    async fn empty_transcript_is_extraction_failure() {
        let provider = ScriptedProvider::new(vec![Ok(text_response("   \n  "))]);
        let pipeline = Pipeline::new(provider, settings());

        assert!(matches!(
            pipeline.generate(&mcq_request()).await,
            Err(PipelineError::ExtractionFailed)
        ));
    }

    #[tokio::test]
    async fn unparseable_model_output_is_malformed() {
        let provider = ScriptedProvider::new(vec![
            Ok(text_response("some page text")),
            Ok(text_response("Sure! Here are your questions: 1) ...")),
        ]);
        let pipeline = Pipeline::new(provider, settings());

        assert!(matches!(
            pipeline.generate(&mcq_request()).await,
            Err(PipelineError::MalformedAiOutput)
        ));
    }

    #[tokio::test]
    async fn transient_failure_is_retried_then_succeeds() {
        let provider = ScriptedProvider::new(vec![
            Err(GroqError::RateLimited { retry_after_seconds: 0 }),
            Ok(text_response("page text")),
            Ok(text_response(r#"[{"front":"F","back":"B"}]"#)),
        ]);
        let pipeline = Pipeline::new(provider, settings());

        let request = GenerateRequest { mode: Mode::Flashcard, ..mcq_request() };
        let response = pipeline.generate(&request).await.unwrap();
        assert_eq!(response.data.len(), 1);
    }

    #[tokio::test]
    async fn permanent_upstream_failure_is_not_retried() {
        let provider = ScriptedProvider::new(vec![Err(GroqError::ApiError {
            status: 401,
            message: "Invalid API key".to_string(),
        })]);
        let pipeline = Pipeline::new(provider, settings());

        match pipeline.generate(&mcq_request()).await {
            Err(PipelineError::Upstream(GroqError::ApiError { status: 401, .. })) => {}
            other => panic!("expected 401 upstream error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn all_items_malformed_is_no_valid_items() {
        let provider = ScriptedProvider::new(vec![
            Ok(text_response("page text")),
            // Flashcards missing the `back` field decode to nothing
            Ok(text_response(r#"{"flashcards":[{"front":"only front"}]}"#)),
        ]);
        let pipeline = Pipeline::new(provider, settings());

        let request = GenerateRequest { mode: Mode::Flashcard, ..mcq_request() };
        assert!(matches!(
            pipeline.generate(&request).await,
            Err(PipelineError::NoValidItems)
        ));
    }
}
