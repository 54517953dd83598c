//! Response normalization for the logic model's JSON output.
//!
//! The model is prompted to wrap its array under a `questions` (or bare
//! array / `flashcards`) shape, but in practice the envelope key is
//! non-deterministic. The normalizer tries the known keys in a fixed
//! priority order and falls back to the object's first property value.

use serde_json::Value;

/// Envelope keys tried in priority order
const ENVELOPE_KEYS: &[&str] = &["questions", "flashcards", "data"];

/// Unwrap the item array from the model's parsed JSON output.
///
/// Returns `None` only when no array can be found at all: the top level is
/// neither an array nor an object, or the object is empty.
pub fn unwrap_items(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => {
            for key in ENVELOPE_KEYS {
                if let Some(Value::Array(items)) = map.get(*key) {
                    return Some(items.clone());
                }
            }
            // Unrecognized envelope: guess the first property
            match map.into_iter().next() {
                Some((_, Value::Array(items))) => Some(items),
                Some((_, other)) => Some(vec![other]),
                None => None,
            }
        }
        _ => None,
    }
}
