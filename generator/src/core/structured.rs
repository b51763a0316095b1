//! Generation with deterministic fallback
//!
//! Every generation-backed step follows the same contract: ask the provider,
//! parse the answer at the boundary, and when anything goes wrong hand back
//! the caller's fallback together with the mode that produced it.

use shared::GenerationMode;
use tracing::{debug, warn};

use super::parser::{parse_structured, Schema};
use crate::error::{GeneratorError, GeneratorResult};
use crate::traits::TextGenerator;
use crate::types::GenerationRequest;

/// A value plus the mode that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Generated<T> {
    pub value: T,
    pub mode: GenerationMode,
}

impl<T> Generated<T> {
    pub fn live(value: T) -> Self {
        Self {
            value,
            mode: GenerationMode::Live,
        }
    }

    /// Wrap fallback content, tagged by why generation did not succeed
    pub fn recovered(err: &GeneratorError, value: T) -> Self {
        Self {
            value,
            mode: mode_for_failure(err),
        }
    }
}

/// No provider configured means demo content; any other failure is a fallback
pub fn mode_for_failure(err: &GeneratorError) -> GenerationMode {
    match err {
        GeneratorError::NotConfigured => GenerationMode::Demo,
        _ => GenerationMode::Fallback,
    }
}

/// Generate and parse a structured payload without any fallback
pub async fn try_structured<G, T>(generator: &G, request: &GenerationRequest) -> GeneratorResult<T>
where
    G: TextGenerator + ?Sized,
    T: Schema,
{
    let response = generator.generate(request).await?;
    debug!(shape = T::SHAPE, tokens = response.tokens_used, "Parsing generated payload");
    parse_structured(&response.content)
}

/// Generate a structured payload, substituting `fallback` on any failure
///
/// The fallback closure is only invoked when it is needed.
pub async fn request_structured<G, T, F>(
    generator: &G,
    request: &GenerationRequest,
    fallback: F,
) -> Generated<T>
where
    G: TextGenerator + ?Sized,
    T: Schema,
    F: FnOnce() -> T,
{
    match try_structured::<G, T>(generator, request).await {
        Ok(value) => Generated::live(value),
        Err(err) => {
            log_fallback(T::SHAPE, &err);
            Generated::recovered(&err, fallback())
        }
    }
}

/// Generate free text, substituting `fallback` on failure or an empty reply
pub async fn request_text<G, F>(generator: &G, request: &GenerationRequest, fallback: F) -> Generated<String>
where
    G: TextGenerator + ?Sized,
    F: FnOnce() -> String,
{
    let outcome = match generator.generate(request).await {
        Ok(response) if !response.content.trim().is_empty() => Ok(response.content.trim().to_string()),
        Ok(_) => Err(GeneratorError::malformed("text reply", "empty completion")),
        Err(err) => Err(err),
    };

    match outcome {
        Ok(text) => Generated::live(text),
        Err(err) => {
            log_fallback("text reply", &err);
            Generated::recovered(&err, fallback())
        }
    }
}

fn log_fallback(shape: &str, err: &GeneratorError) {
    match err {
        GeneratorError::NotConfigured => debug!(shape, "No provider configured, using demo content"),
        other => warn!(shape, error = %other, "Generation failed, using fallback content"),
    }
}
