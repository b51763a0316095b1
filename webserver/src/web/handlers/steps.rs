//! Workshop step endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use generator::TextGenerator;
use orchestrator::WorkshopRepository;
use shared::{
    ChallengeId, ChallengeLogEntry, ChallengeRunOutcome, ChatReply, ChatRequest, DashboardView, DataLineageEntry,
    ImportRequest, PrioritizationSummary, ReconcileOutcome, ResolveChallengeRequest, SurveySubmission,
    UseCase, UseCaseEdit, UseCaseId, ValidationOutcome, WorkflowOutcome, Workshop, WorkshopId,
};

use crate::error::WebServerResult;
use crate::types::ApiResponse;
use crate::web::parse_id;
use crate::webserver_impl::WebServer;

type ApiResult<T> = WebServerResult<Json<ApiResponse<T>>>;

/// POST /api/workshops/:id/import/research
pub async fn import_research<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> ApiResult<Workshop>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let Json(request) = payload?;
    let workshop = server.orchestrator().import_research(id, request).await?;
    Ok(Json(ApiResponse::ok(workshop)))
}

/// POST /api/workshops/:id/import/cognition
pub async fn import_cognition<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> ApiResult<Workshop>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let Json(request) = payload?;
    let workshop = server.orchestrator().import_cognition(id, request).await?;
    Ok(Json(ApiResponse::ok(workshop)))
}

/// POST /api/workshops/:id/survey
pub async fn submit_survey<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
    payload: Result<Json<SurveySubmission>, JsonRejection>,
) -> ApiResult<Workshop>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let Json(submission) = payload?;
    let workshop = server.orchestrator().submit_survey(id, submission).await?;
    Ok(Json(ApiResponse::ok(workshop)))
}

/// POST /api/workshops/:id/reconcile
pub async fn reconcile<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> ApiResult<ReconcileOutcome>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let outcome = server.orchestrator().reconcile(id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// PATCH /api/workshops/:id/use-cases/:use_case_id
pub async fn edit_use_case<R, G>(
    State(server): State<WebServer<R, G>>,
    Path((id, use_case_id)): Path<(String, String)>,
    payload: Result<Json<UseCaseEdit>, JsonRejection>,
) -> ApiResult<UseCase>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let use_case_id: UseCaseId = parse_id("useCaseId", &use_case_id)?;
    let Json(edit) = payload?;
    let use_case = server.orchestrator().edit_use_case(id, use_case_id, edit).await?;
    Ok(Json(ApiResponse::ok(use_case)))
}

/// POST /api/workshops/:id/challenge
pub async fn run_challenge<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> ApiResult<ChallengeRunOutcome>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let outcome = server.orchestrator().run_challenge(id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// PUT /api/workshops/:id/challenge/:log_id
pub async fn resolve_challenge<R, G>(
    State(server): State<WebServer<R, G>>,
    Path((id, log_id)): Path<(String, String)>,
    payload: Result<Json<ResolveChallengeRequest>, JsonRejection>,
) -> ApiResult<ChallengeLogEntry>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let challenge_id: ChallengeId = parse_id("logId", &log_id)?;
    let Json(request) = payload?;
    let entry = server.orchestrator().resolve_challenge(id, challenge_id, request).await?;
    Ok(Json(ApiResponse::ok(entry)))
}

/// POST /api/workshops/:id/validate
pub async fn validate<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> ApiResult<ValidationOutcome>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let outcome = server.orchestrator().validate(id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// POST /api/workshops/:id/prioritize
pub async fn prioritize<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> ApiResult<PrioritizationSummary>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let summary = server.orchestrator().prioritize(id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// POST /api/workshops/:id/workflows
pub async fn visualize_workflows<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> ApiResult<WorkflowOutcome>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let outcome = server.orchestrator().visualize_workflows(id).await?;
    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/workshops/:id/lineage
pub async fn lineage<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> ApiResult<Vec<DataLineageEntry>>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let entries = server.orchestrator().lineage(id).await?;
    Ok(Json(ApiResponse::ok(entries)))
}

/// GET /api/workshops/:id/dashboard
pub async fn dashboard<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
) -> ApiResult<DashboardView>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let view = server.orchestrator().dashboard(id).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/workshops/:id/chat
pub async fn chat<R, G>(
    State(server): State<WebServer<R, G>>,
    Path(id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<ChatReply>
where
    R: WorkshopRepository + 'static,
    G: TextGenerator + 'static,
{
    let id: WorkshopId = parse_id("id", &id)?;
    let Json(request) = payload?;
    let reply = server.orchestrator().chat(id, request).await?;
    Ok(Json(ApiResponse::ok(reply)))
}
