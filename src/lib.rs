//! snapquiz - turn a photo of a textbook page into study material
//!
//! A two-stage pipeline transcribes the page with a vision model and
//! turns the transcript into structured MCQs or flashcards with a text
//! model. The result is served over an HTTP API or played directly in an
//! interactive terminal session.

pub mod app;
pub mod config;
pub mod groq;
pub mod pipeline;
pub mod quiz;
pub mod server;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
