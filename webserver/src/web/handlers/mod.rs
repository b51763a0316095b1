//! Route handlers
//!
//! Handlers stay thin: parse identifiers and bodies, call one orchestrator
//! operation, wrap the result in `ApiResponse`.

pub mod health;
pub mod steps;
pub mod workshops;
