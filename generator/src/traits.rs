//! Generator trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::GeneratorResult;
use crate::types::{GenerationRequest, GenerationResponse};

/// External text-generation collaborator
///
/// Constructed once at startup and shared by reference with every engine.
#[mockall::automock]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a structured prompt and return the raw completion text
    async fn generate(&self, request: &GenerationRequest) -> GeneratorResult<GenerationResponse>;

    /// Whether a real provider sits behind this generator
    fn is_live(&self) -> bool;
}
