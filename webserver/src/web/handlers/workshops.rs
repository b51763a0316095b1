//! Workshop lifecycle endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use generator::TextGenerator;
use orchestrator::WorkshopRepository;
use shared::{CreateWorkshopRequest, StatusUpdateRequest, Workshop, WorkshopId, WorkshopOverview};

use crate::error::WebServerResult;
use crate::types::ApiResponse;
use crate::web::parse_id;
use crate::webserver_impl::WebServer;

/// POST /api/workshops
pub async fn create_workshop<R, G>(
    State(server): State<WebServer<R, G>>,
    payload: Result<Json<CreateWorkshopRequest>, JsonRejection>,
) -> WebServerResult<(StatusCode, Json<ApiResponse<Workshop>>)>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let Json(request) = payload?;
    let workshop = server.orchestrator().create_workshop(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(workshop))))
}

/// GET /api/workshops
pub async fn list_workshops<R, G>(
    State(server): State<WebServer<R, G>>,
) -> WebServerResult<Json<ApiResponse<Vec<WorkshopOverview>>>>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let workshops = server.orchestrator().list_workshops().await?;
    Ok(Json(ApiResponse::ok(workshops)))
}

/// GET /api/workshops/:id
pub async fn get_workshop<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> WebServerResult<Json<ApiResponse<Workshop>>>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let workshop = server.orchestrator().get_workshop(id).await?;
    Ok(Json(ApiResponse::ok(workshop)))
}

/// PUT /api/workshops/:id/status
pub async fn update_status<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdateRequest>, JsonRejection>,
) -> WebServerResult<Json<ApiResponse<Workshop>>>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let Json(request) = payload?;
    let workshop = server.orchestrator().update_status(id, request).await?;
    Ok(Json(ApiResponse::ok(workshop)))
}
