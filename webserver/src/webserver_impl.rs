//! Main webserver implementation
//!
//! `WebServer` owns the shared orchestrator and exposes every workshop step
//! as a JSON route under `/api`.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post, put};
use generator::TextGenerator;
use orchestrator::{WorkshopOrchestrator, WorkshopRepository};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::web::handlers::{health, steps, workshops};

/// HTTP front for the workshop orchestrator
pub struct WebServer<R, G>
where
    R: WorkshopRepository,
    G: TextGenerator,
{
    state: Arc<WebServerState>,
    orchestrator: Arc<WorkshopOrchestrator<R, G>>,
}

// Derived Clone would require R: Clone and G: Clone
impl<R, G> Clone for WebServer<R, G>
where
    R: WorkshopRepository,
    G: TextGenerator,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            orchestrator: Arc::clone(&self.orchestrator),
        }
    }
}

impl<R, G> WebServer<R, G>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    pub fn new(bind_address: SocketAddr, orchestrator: WorkshopOrchestrator<R, G>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(bind_address)),
            orchestrator: Arc::new(orchestrator),
        }
    }

    pub fn orchestrator(&self) -> &WorkshopOrchestrator<R, G> {
        &self.orchestrator
    }

    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        let api = Router::new()
            .route("/health", get(health::health_check::<R, G>))
            .route(
                "/workshops",
                post(workshops::create_workshop::<R, G>).get(workshops::list_workshops::<R, G>),
            )
            .route("/workshops/:id", get(workshops::get_workshop::<R, G>))
            .route("/workshops/:id/status", put(workshops::update_status::<R, G>))
            .route("/workshops/:id/import/research", post(steps::import_research::<R, G>))
            .route("/workshops/:id/import/cognition", post(steps::import_cognition::<R, G>))
            .route("/workshops/:id/survey", post(steps::submit_survey::<R, G>))
            .route("/workshops/:id/reconcile", post(steps::reconcile::<R, G>))
            .route("/workshops/:id/use-cases/:use_case_id", patch(steps::edit_use_case::<R, G>))
            .route("/workshops/:id/challenge", post(steps::run_challenge::<R, G>))
            .route("/workshops/:id/challenge/:log_id", put(steps::resolve_challenge::<R, G>))
            .route("/workshops/:id/validate", post(steps::validate::<R, G>))
            .route("/workshops/:id/prioritize", post(steps::prioritize::<R, G>))
            .route("/workshops/:id/workflows", post(steps::visualize_workflows::<R, G>))
            .route("/workshops/:id/lineage", get(steps::lineage::<R, G>))
            .route("/workshops/:id/dashboard", get(steps::dashboard::<R, G>))
            .route("/workshops/:id/chat", post(steps::chat::<R, G>));

        Router::new()
            .nest("/api", api)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run<F>(&self, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let bind_address = self.state.bind_address;

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {bind_address}: {e}")))?;

        info!(address = %bind_address, live = self.orchestrator.is_live(), "Web server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Server error: {e}")))?;

        Ok(())
    }
}
