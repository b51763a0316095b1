//! Response envelopes for the HTTP API

use serde::Serialize;
use shared::GenerationMode;

/// `{"status": "ok", "data": ...}` wrapper for every successful response
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: "ok", data }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub server_status: &'static str,
    pub uptime_seconds: u64,
    /// `live` with a provider configured, `demo` otherwise
    pub generation: GenerationMode,
    pub version: &'static str,
}
