//! Generator used when no provider key is configured

use async_trait::async_trait;

use crate::error::{GeneratorError, GeneratorResult};
use crate::traits::TextGenerator;
use crate::types::{GenerationRequest, GenerationResponse};

/// Always declines, so every step runs on deterministic placeholder content
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> GeneratorResult<GenerationResponse> {
        Err(GeneratorError::NotConfigured)
    }

    fn is_live(&self) -> bool {
        false
    }
}
