//! Boundary parsing of generated text into typed payloads

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

use crate::error::{GeneratorError, GeneratorResult};

/// Matches the body of the first fenced block, with or without a language tag
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("valid fence pattern"));

/// A payload shape the generator is asked to produce
///
/// Deserialization alone only proves the JSON has the right field types;
/// `check` enforces the content rules the engines depend on.
pub trait Schema: DeserializeOwned {
    /// Human-readable name used in error messages and logs
    const SHAPE: &'static str;

    fn check(&self) -> Result<(), String>;
}

/// Return the contents of the first fenced code block, or the trimmed input
pub fn strip_code_fences(text: &str) -> &str {
    match FENCE.captures(text).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim(),
        None => text.trim(),
    }
}

/// Candidate JSON documents in the order they should be tried
fn json_candidates(text: &str) -> Vec<&str> {
    let unfenced = strip_code_fences(text);
    let mut candidates = vec![unfenced];

    // Prose around a bare object: fall back to the outermost braces
    if let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) {
        if start < end {
            let braced = &unfenced[start..=end];
            if braced != unfenced {
                candidates.push(braced);
            }
        }
    }
    candidates
}

/// Parse generated text into `T`, rejecting anything that does not match
pub fn parse_structured<T: Schema>(text: &str) -> GeneratorResult<T> {
    if text.trim().is_empty() {
        return Err(GeneratorError::malformed(T::SHAPE, "empty completion"));
    }

    let mut last_error = String::from("no JSON object found");
    for candidate in json_candidates(text) {
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => {
                value.check().map_err(|reason| GeneratorError::malformed(T::SHAPE, reason))?;
                return Ok(value);
            }
            Err(e) => last_error = e.to_string(),
        }
    }
    Err(GeneratorError::malformed(T::SHAPE, last_error))
}
