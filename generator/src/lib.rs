//! Text generation collaborator for the workshop backend
//!
//! Wraps hosted chat APIs (OpenAI, Anthropic) behind the `TextGenerator`
//! trait, parses their output against explicit schemas and falls back to
//! deterministic content whenever a provider is missing or misbehaves.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

pub use crate::core::*;
pub use error::{ApiFailure, GeneratorError, GeneratorResult};
pub use services::*;
pub use traits::*;
pub use types::*;
