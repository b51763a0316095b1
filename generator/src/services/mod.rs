//! Text generator implementations

pub mod offline;
pub mod provider_client;

pub use offline::OfflineGenerator;
pub use provider_client::RealTextGenerator;

use crate::error::GeneratorResult;
use crate::traits::TextGenerator;
use crate::types::{GenerationRequest, GenerationResponse};

/// Lets the binary pick a provider at runtime behind `Box<dyn TextGenerator>`
#[async_trait::async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, request: &GenerationRequest) -> GeneratorResult<GenerationResponse> {
        (**self).generate(request).await
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}

#[cfg(test)]
mod tests;
