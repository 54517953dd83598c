//! Groq API integration module
//!
//! Provides API key management, an HTTP client for the OpenAI-compatible
//! chat-completions endpoint, and the typed request/response models the
//! generation pipeline builds on.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use auth::ApiKeyManager;
pub use client::{ChatProvider, GroqClient};
pub use error::GroqError;
pub use models::{ChatMessage, ChatRequest, ChatResponse, GroqModel, Role, data_url};
