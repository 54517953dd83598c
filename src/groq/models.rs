//! Data models for Groq chat-completion requests and responses
//!
//! Groq exposes an OpenAI-compatible API: user messages may carry either a
//! plain string or a list of typed content parts, which is how images are
//! attached for vision models.

use serde::{Deserialize, Serialize};

/// Available Groq models
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroqModel {
    /// Llama 4 Scout 17B - multimodal, used for page transcription
    #[default]
    Llama4Scout,
    /// Llama 3.3 70B Versatile - text-only, used for structured generation
    Llama33Versatile,
    /// Llama 3.1 8B Instant - fast, cheap text-only fallback
    Llama31Instant,
}

impl GroqModel {
    /// Get the API model identifier
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Llama4Scout => "meta-llama/llama-4-scout-17b-16e-instruct",
            Self::Llama33Versatile => "llama-3.3-70b-versatile",
            Self::Llama31Instant => "llama-3.1-8b-instant",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Llama4Scout => "Llama 4 Scout 17B",
            Self::Llama33Versatile => "Llama 3.3 70B Versatile",
            Self::Llama31Instant => "Llama 3.1 8B Instant",
        }
    }

    /// Whether the model accepts image content parts
    pub fn supports_vision(&self) -> bool {
        matches!(self, Self::Llama4Scout)
    }

    /// Parse model from string (for config files or the command line)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            // User-friendly names
            "scout" | "llama4-scout" | "llama-4-scout" => Some(Self::Llama4Scout),
            "versatile" | "llama33" | "llama3.3" => Some(Self::Llama33Versatile),
            "instant" | "llama31" | "llama3.1" => Some(Self::Llama31Instant),
            // Model IDs
            "meta-llama/llama-4-scout-17b-16e-instruct" => Some(Self::Llama4Scout),
            "llama-3.3-70b-versatile" => Some(Self::Llama33Versatile),
            "llama-3.1-8b-instant" => Some(Self::Llama31Instant),
            _ => None,
        }
    }

    /// List all available models
    pub fn all() -> &'static [GroqModel] {
        &[Self::Llama4Scout, Self::Llama33Versatile, Self::Llama31Instant]
    }
}

impl std::str::FromStr for GroqModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| format!("Unknown model: {}. Options: scout, versatile, instant", s))
    }
}

/// Message role in conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// A single message in the conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Message content
    pub content: MessageContent,
}

impl ChatMessage {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: MessageContent::Text(content.into()) }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: MessageContent::Text(content.into()) }
    }

    /// Create a user message carrying an image (as a data URL) plus an instruction
    pub fn user_with_image(text: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(vec![
                ContentPart::ImageUrl { image_url: ImageUrl { url: data_url.into() } },
                ContentPart::Text { text: text.into() },
            ]),
        }
    }
}

/// Message content: a plain string, or typed parts for multimodal input
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content
    Text(String),
    /// Multimodal content parts
    Parts(Vec<ContentPart>),
}

/// One typed content part of a multimodal message
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// An image attachment, referenced by URL (data URLs included)
    ImageUrl {
        /// Image reference
        image_url: ImageUrl,
    },
    /// A text fragment
    Text {
        /// Text content
        text: String,
    },
}

/// Image reference inside a content part
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// `https://` or `data:` URL
    pub url: String,
}

/// Build a `data:` URL from a MIME type and base64-encoded bytes
pub fn data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

/// Requested output format for the completion
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    /// Format identifier, e.g. "json_object"
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    /// Ask the model for a single well-formed JSON object
    pub fn json_object() -> Self {
        Self { format_type: "json_object".to_string() }
    }
}

/// Request body for the chat-completions API
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Constrained output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Create a new request with default settings
    pub fn new(model: GroqModel, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.model_id().to_string(),
            messages,
            max_tokens: 4096,
            temperature: None,
            response_format: None,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Request JSON-object output
    pub fn with_json_output(mut self) -> Self {
        self.response_format = Some(ResponseFormat::json_object());
        self
    }
}

/// Response from the chat-completions API
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices (the API returns at least one)
    pub choices: Vec<Choice>,
    /// Token usage statistics
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Text content of the first choice, or empty string if absent
    pub fn first_text(&self) -> String {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default()
    }
}

/// One completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message
    pub message: ResponseMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message inside a completion choice
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Generated text, absent for refusals
    pub content: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Input tokens used
    pub prompt_tokens: u32,
    /// Output tokens generated
    pub completion_tokens: u32,
}
