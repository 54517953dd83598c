//! Quiz domain types and session state machines
//!
//! Item types decode leniently: the upstream model is prompted with an
//! exact schema but does not always honour it, so missing fields default
//! and malformed items are filtered at the shuffle stage rather than
//! failing a whole response.

pub mod flashcards;
pub mod session;
pub mod shuffle;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use flashcards::FlashcardSession;
pub use session::{QuizSession, Rating};
pub use shuffle::shuffle_mcq;

/// Leading "A. " / "B. " style label the model sometimes prefixes to
/// option texts; stripped for display, kept in the data.
static OPTION_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-D]\.\s*").expect("option prefix regex is valid"));

/// One multiple-choice question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct McqItem {
    /// Question text
    #[serde(default)]
    pub question: String,
    /// Ordered choice texts, nominally four, labeled or unlabeled
    #[serde(default)]
    pub options: Vec<String>,
    /// Correct option letter, A-D, by position
    #[serde(default)]
    pub answer: String,
}

impl McqItem {
    /// Index of the correct option, defaulting to 0 for a missing,
    /// out-of-range, or otherwise unusable answer letter.
    pub fn correct_index(&self) -> usize {
        letter_index(&self.answer, self.options.len())
    }

    /// Correct answer as an uppercase letter
    pub fn correct_letter(&self) -> char {
        index_letter(self.correct_index())
    }

    /// Option text with any leading "A. "-style label stripped
    pub fn display_option(&self, index: usize) -> &str {
        let raw = self.options.get(index).map(String::as_str).unwrap_or_default();
        OPTION_PREFIX.find(raw).map(|m| &raw[m.end()..]).unwrap_or(raw)
    }
}

/// One flashcard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlashcardItem {
    /// Prompt text
    pub front: String,
    /// Answer text
    pub back: String,
}

/// Map an answer letter to an option index, clamped into `0..len`.
///
/// Accepts lowercase letters; empty or out-of-range letters fall back to
/// position 0 rather than rejecting the item.
pub(crate) fn letter_index(answer: &str, len: usize) -> usize {
    let letter = answer.trim().chars().next().unwrap_or('A').to_ascii_uppercase();
    let index = (letter as i32) - ('A' as i32);
    if index < 0 || len == 0 || index as usize >= len {
        0
    } else {
        index as usize
    }
}

/// Map an option index to its uppercase letter
pub(crate) fn index_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}
