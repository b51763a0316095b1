//! Liveness endpoint

use axum::extract::State;
use axum::Json;
use generator::TextGenerator;
use orchestrator::WorkshopRepository;
use shared::GenerationMode;

use crate::types::{ApiResponse, HealthReport};
use crate::webserver_impl::WebServer;

pub async fn health_check<R, G>(State(server): State<WebServer<R, G>>) -> Json<ApiResponse<HealthReport>>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let generation = if server.orchestrator().is_live() {
        GenerationMode::Live
    } else {
        GenerationMode::Demo
    };
    Json(ApiResponse::ok(HealthReport {
        server_status: "running",
        uptime_seconds: server.state().get_uptime_seconds(),
        generation,
        version: env!("CARGO_PKG_VERSION"),
    }))
}
