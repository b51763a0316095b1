//! HTTP surface: route handlers and identifier parsing

pub mod handlers;

use std::str::FromStr;

use crate::error::{WebServerError, WebServerResult};

/// Parse a path segment into a typed identifier
pub fn parse_id<T: FromStr>(field: &'static str, raw: &str) -> WebServerResult<T> {
    raw.trim().parse().map_err(|_| WebServerError::InvalidId {
        field,
        input: raw.to_string(),
    })
}
