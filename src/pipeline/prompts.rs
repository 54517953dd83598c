//! Prompt templates for the two-stage generation pipeline.
//!
//! Centralising every prompt here keeps the orchestration code in
//! [`crate::pipeline`] free of string literals and lets unit tests inspect
//! the templates without calling a real model.

/// Instruction sent with the page image to the vision model.
pub const EXTRACTION_PROMPT: &str = "Please extract and transcribe ALL readable text from this \
textbook page. Include headings, body text, lists, and any visible content. Return the raw text \
only.";

/// System prompt for multiple-choice question generation.
///
/// The schema description is part of the upstream contract: the logic model
/// is told to wrap the array under a `questions` key, but the normalizer
/// still tolerates bare arrays and other envelope keys.
pub const MCQ_SYSTEM_PROMPT: &str = r#"You are an expert educator. Given the text content of a textbook page, generate up to 15 multiple-choice questions.
Return ONLY a valid JSON object with a "questions" key containing an array. No extra text, markdown, or code fences.
Example:
{
  "questions": [
    {"question":"string","options":["A. text","B. text","C. text","D. text"],"answer":"A"}
  ]
}
The "answer" field must be exactly one of: "A", "B", "C", or "D", matching the correct option."#;

/// System prompt for flashcard generation.
pub const FLASHCARD_SYSTEM_PROMPT: &str = r#"You are an expert educator. Given the text content of a textbook page, generate concise flashcards for key concepts, terms, and facts.
Return ONLY a valid JSON array with no extra text, markdown, or code fences. Each element must follow this exact schema:
{"front":"Question or Term","back":"Answer or Definition"}
Generate between 8 and 20 flashcards."#;

/// Build the user turn for the structured-generation step.
pub fn generation_user_turn(extracted_text: &str, item_kind: &str) -> String {
    format!(
        "Here is the textbook content:\n\n{}\n\nGenerate the {} now.",
        extracted_text, item_kind
    )
}
