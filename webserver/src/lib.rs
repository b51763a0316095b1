//! HTTP API for the AI-readiness workshop backend
//!
//! Thin axum layer over `orchestrator::WorkshopOrchestrator`: parses
//! identifiers and bodies, maps domain errors to status codes and wraps
//! results in a JSON envelope.

pub mod error;
pub mod state;
pub mod types;
pub mod web;
pub mod webserver_impl;

pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use types::*;
pub use webserver_impl::WebServer;
