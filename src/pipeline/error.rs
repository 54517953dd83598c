//! Error taxonomy for the generation pipeline.
//!
//! Every variant maps to exactly one HTTP status at the server boundary:
//!
//! * `MissingFields` / `InvalidMode` — 400, the caller's request is wrong
//! * `ExtractionFailed` — 422, the image produced no usable text; this is
//!   the one domain-specific classification ("image unreadable"), not a
//!   transient fault
//! * `MalformedAiOutput` / `NoValidItems` — 500, upstream contract
//!   violation; re-issuing the request may succeed
//! * `Upstream` — 500, the hosted model API itself failed after retries

use thiserror::Error;

use crate::groq::GroqError;

/// Errors produced by the two-stage generation pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Request body is missing one of the three required fields
    #[error("Missing required fields: image, mimeType, mode")]
    MissingFields,

    /// `mode` is present but not a recognized value
    #[error("mode must be \"mcq\" or \"flashcard\"")]
    InvalidMode,

    /// The vision model returned no usable text for the image
    #[error("Could not extract text from image. Please use a clearer photo.")]
    ExtractionFailed,

    /// The logic model's output did not parse as JSON
    #[error("AI returned malformed JSON. Please try again.")]
    MalformedAiOutput,

    /// Every generated item was dropped as malformed
    #[error("No valid items could be generated from this page. Please try a clearer image.")]
    NoValidItems,

    /// The hosted model API failed (after retries for transient faults)
    #[error(transparent)]
    Upstream(#[from] GroqError),
}

impl PipelineError {
    /// Whether this is a client mistake (HTTP 400 class)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PipelineError::MissingFields | PipelineError::InvalidMode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_classified() {
        assert!(PipelineError::MissingFields.is_invalid_input());
        assert!(PipelineError::InvalidMode.is_invalid_input());
        assert!(!PipelineError::ExtractionFailed.is_invalid_input());
        assert!(!PipelineError::MalformedAiOutput.is_invalid_input());
    }
}
