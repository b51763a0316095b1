//! Workshop orchestrator
//!
//! Sequences the workshop steps on top of the engines. Each step reads a
//! snapshot, asks the text generator for whatever commentary it needs, then
//! commits one `WorkshopMutation` through the repository. Generation failures
//! never surface as errors; they show up as the mode on the step's outcome.

use chrono::Utc;
use generator::fallback::chat_reply;
use generator::prompt::{benefit_request, challenge_request, chat_request, workflow_request};
use generator::{request_structured, request_text, BenefitAssessmentSet, TextGenerator};
use shared::{
    workshop_debug, workshop_info, workshop_warn, BatchId, ChallengeId, ChallengeLogEntry, ChallengeRunOutcome,
    ChallengeStatus, ChatReply, ChatRequest, CreateWorkshopRequest, DashboardView, DataLineageEntry, GenerationMode,
    ImportRequest, ImportedSource, PrioritizationSummary, Quadrant, ReadinessSurvey, ReconcileOutcome,
    ResolveChallengeRequest, SourceSystem, StatusUpdateRequest, SurveySubmission, UseCase, UseCaseEdit, UseCaseId,
    ValidationOutcome, WorkflowOutcome, Workshop, WorkshopId, WorkshopOverview,
};

use crate::config::EngineConfig;
use crate::core::{challenge, lineage, WorkshopMutation};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::WorkshopRepository;

/// Entry point for every workshop operation
pub struct WorkshopOrchestrator<R, G>
where
    R: WorkshopRepository,
    G: TextGenerator,
{
    repository: R,
    generator: G,
    config: EngineConfig,
}

impl<R, G> WorkshopOrchestrator<R, G>
where
    R: WorkshopRepository,
    G: TextGenerator,
{
    /// Create new orchestrator with injected dependencies
    pub fn new(repository: R, generator: G, config: EngineConfig) -> Self {
        Self {
            repository,
            generator,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether generated content can come from a real provider
    pub fn is_live(&self) -> bool {
        self.generator.is_live()
    }

    pub async fn create_workshop(&self, request: CreateWorkshopRequest) -> OrchestratorResult<Workshop> {
        request.validate()?;
        let workshop = Workshop::new(
            request.company_name.trim().to_string(),
            request.industry.trim().to_string(),
            request.facilitator_name.trim().to_string(),
        );
        let workshop = self.repository.create(workshop).await?;
        workshop_info!(workshop.id, company = %workshop.company_name, "Workshop created");
        Ok(workshop)
    }

    pub async fn list_workshops(&self) -> OrchestratorResult<Vec<WorkshopOverview>> {
        let workshops = self.repository.list().await?;
        Ok(workshops.iter().map(WorkshopOverview::from).collect())
    }

    pub async fn get_workshop(&self, id: WorkshopId) -> OrchestratorResult<Workshop> {
        self.repository.get(id).await
    }

    pub async fn update_status(&self, id: WorkshopId, request: StatusUpdateRequest) -> OrchestratorResult<Workshop> {
        let workshop = self.repository.apply(id, WorkshopMutation::SetStatus(request.status)).await?;
        workshop_info!(id, status = %workshop.status, "Status updated");
        Ok(workshop)
    }

    /// Attach a raw report from one source, replacing any earlier one
    ///
    /// Reconciliation is a separate step; the current use cases are kept
    /// until it runs.
    pub async fn import_source(
        &self,
        id: WorkshopId,
        source: SourceSystem,
        request: ImportRequest,
    ) -> OrchestratorResult<Workshop> {
        request.validate()?;
        let count = request.use_cases.len();
        let import = ImportedSource {
            source,
            report_id: request.report_id.trim().to_string(),
            use_cases: request.use_cases,
            imported_at: Utc::now(),
        };
        let workshop = self.repository.apply(id, WorkshopMutation::AttachImport(import)).await?;
        workshop_info!(id, source = %source, use_cases = count, "Import attached");
        Ok(workshop)
    }

    pub async fn import_research(&self, id: WorkshopId, request: ImportRequest) -> OrchestratorResult<Workshop> {
        self.import_source(id, SourceSystem::ResearchApp, request).await
    }

    pub async fn import_cognition(&self, id: WorkshopId, request: ImportRequest) -> OrchestratorResult<Workshop> {
        self.import_source(id, SourceSystem::CognitionTwo, request).await
    }

    pub async fn submit_survey(&self, id: WorkshopId, submission: SurveySubmission) -> OrchestratorResult<Workshop> {
        submission.validate()?;
        let survey = ReadinessSurvey {
            respondent: submission.respondent.trim().to_string(),
            data_maturity: submission.data_maturity,
            process_maturity: submission.process_maturity,
            organizational_maturity: submission.organizational_maturity,
            technical_maturity: submission.technical_maturity,
            notes: submission.notes,
            submitted_at: Utc::now(),
        };
        let mean = survey.mean_maturity();
        let workshop = self.repository.apply(id, WorkshopMutation::SetSurvey(survey)).await?;
        workshop_info!(id, mean_maturity = mean, "Readiness survey recorded");
        Ok(workshop)
    }

    pub async fn reconcile(&self, id: WorkshopId) -> OrchestratorResult<ReconcileOutcome> {
        let workshop = self
            .repository
            .apply(
                id,
                WorkshopMutation::Reconcile {
                    config: self.config.clone(),
                },
            )
            .await?;

        // Every merge folds exactly one raw entry into a survivor
        let raw_total: usize = [SourceSystem::ResearchApp, SourceSystem::CognitionTwo]
            .into_iter()
            .filter_map(|source| workshop.import_for(source))
            .map(|import| import.use_cases.len())
            .sum();
        let merged_count = raw_total.saturating_sub(workshop.use_cases.len());

        workshop_info!(id, use_cases = workshop.use_cases.len(), merged = merged_count, "Use cases reconciled");
        Ok(ReconcileOutcome {
            use_cases: workshop.use_cases,
            merged_count,
        })
    }

    pub async fn edit_use_case(
        &self,
        id: WorkshopId,
        use_case_id: UseCaseId,
        edit: UseCaseEdit,
    ) -> OrchestratorResult<UseCase> {
        let workshop = self
            .repository
            .apply(
                id,
                WorkshopMutation::EditUseCase {
                    use_case_id,
                    edit,
                    config: self.config.clone(),
                },
            )
            .await?;
        workshop_debug!(id, use_case = %use_case_id, "Use case edited");
        workshop
            .use_cases
            .into_iter()
            .find(|u| u.id == use_case_id)
            .ok_or_else(|| OrchestratorError::not_found("use case", use_case_id))
    }

    /// Generate one batch of challenges and append it to the log
    pub async fn run_challenge(&self, id: WorkshopId) -> OrchestratorResult<ChallengeRunOutcome> {
        let snapshot = self.repository.get(id).await?;
        if snapshot.use_cases.is_empty() {
            return Err(OrchestratorError::missing("reconciled use cases"));
        }

        let request = challenge_request(&snapshot, &snapshot.use_cases);
        let mut generated =
            request_structured(&self.generator, &request, || challenge::fallback_proposals(&snapshot.use_cases)).await;

        let usable = challenge::build_entries(&generated.value, &snapshot.use_cases, BatchId::new(), Utc::now());
        if usable.is_empty() && generated.mode == GenerationMode::Live {
            workshop_warn!(id, "Generated challenges reference no known use case, using fallback");
            generated.value = challenge::fallback_proposals(&snapshot.use_cases);
            generated.mode = GenerationMode::Fallback;
        }

        let batch_id = BatchId::new();
        let workshop = self
            .repository
            .apply(
                id,
                WorkshopMutation::AppendChallenges {
                    batch_id,
                    proposals: generated.value,
                },
            )
            .await?;
        let entries: Vec<ChallengeLogEntry> =
            workshop.challenge_log.into_iter().filter(|e| e.batch_id == batch_id).collect();

        workshop_info!(id, batch = %batch_id, entries = entries.len(), mode = %generated.mode, "Challenge batch appended");
        Ok(ChallengeRunOutcome {
            batch_id,
            entries,
            mode: generated.mode,
        })
    }

    pub async fn resolve_challenge(
        &self,
        id: WorkshopId,
        challenge_id: ChallengeId,
        request: ResolveChallengeRequest,
    ) -> OrchestratorResult<ChallengeLogEntry> {
        let workshop = self
            .repository
            .apply(
                id,
                WorkshopMutation::ResolveChallenge {
                    challenge_id,
                    decision: request.decision,
                    responded_by: request.responded_by,
                },
            )
            .await?;
        let entry = workshop
            .challenge_log
            .into_iter()
            .find(|e| e.id == challenge_id)
            .ok_or_else(|| OrchestratorError::not_found("challenge entry", challenge_id))?;
        workshop_info!(id, challenge = %challenge_id, status = ?entry.status, "Challenge resolved");
        Ok(entry)
    }

    pub async fn validate(&self, id: WorkshopId) -> OrchestratorResult<ValidationOutcome> {
        let snapshot = self.repository.get(id).await?;
        let survey = snapshot
            .survey
            .as_ref()
            .ok_or_else(|| OrchestratorError::missing("readiness survey"))?;
        if snapshot.use_cases.is_empty() {
            return Err(OrchestratorError::missing("reconciled use cases"));
        }

        let request = benefit_request(&snapshot, &snapshot.use_cases, survey);
        let generated = request_structured(&self.generator, &request, || BenefitAssessmentSet {
            assessments: Vec::new(),
        })
        .await;

        let workshop = self
            .repository
            .apply(
                id,
                WorkshopMutation::Validate {
                    commentary: generated.value,
                    mode: generated.mode,
                    config: self.config.clone(),
                },
            )
            .await?;
        let summary = workshop.validation_summary.ok_or_else(|| OrchestratorError::Storage {
            message: "validation summary missing after commit".to_string(),
        })?;

        workshop_info!(
            id,
            original = summary.total_original_value,
            validated = summary.total_validated_value,
            mode = %generated.mode,
            "Benefits validated"
        );
        Ok(ValidationOutcome {
            results: workshop.validation_results,
            summary,
        })
    }

    pub async fn prioritize(&self, id: WorkshopId) -> OrchestratorResult<PrioritizationSummary> {
        let workshop = self
            .repository
            .apply(
                id,
                WorkshopMutation::Prioritize {
                    config: self.config.clone(),
                },
            )
            .await?;
        let summary = workshop.prioritization.ok_or_else(|| OrchestratorError::Storage {
            message: "prioritization missing after commit".to_string(),
        })?;
        workshop_info!(id, use_cases = summary.items.len(), "Use cases prioritized");
        Ok(summary)
    }

    pub async fn visualize_workflows(&self, id: WorkshopId) -> OrchestratorResult<WorkflowOutcome> {
        let snapshot = self.repository.get(id).await?;
        if snapshot.use_cases.is_empty() {
            return Err(OrchestratorError::missing("reconciled use cases"));
        }

        let request = workflow_request(&snapshot, &snapshot.use_cases);
        let generated =
            request_structured(&self.generator, &request, || lineage::fallback_drafts(&snapshot.use_cases)).await;

        let workshop = self
            .repository
            .apply(
                id,
                WorkshopMutation::ReplaceWorkflows {
                    drafts: generated.value,
                },
            )
            .await?;
        workshop_info!(id, workflows = workshop.workflows.len(), mode = %generated.mode, "Workflows visualized");
        Ok(WorkflowOutcome {
            workflows: workshop.workflows,
            lineage: workshop.data_lineage,
            mode: generated.mode,
        })
    }

    /// Lineage from the last workflow visualization; empty until one has run
    pub async fn lineage(&self, id: WorkshopId) -> OrchestratorResult<Vec<DataLineageEntry>> {
        Ok(self.repository.get(id).await?.data_lineage)
    }

    /// Decision dashboard, prioritizing first when the stored ranking is stale
    pub async fn dashboard(&self, id: WorkshopId) -> OrchestratorResult<DashboardView> {
        let mut workshop = self.repository.get(id).await?;
        if workshop.prioritization.is_none() {
            workshop = self
                .repository
                .apply(
                    id,
                    WorkshopMutation::Prioritize {
                        config: self.config.clone(),
                    },
                )
                .await?;
        }
        let prioritization = workshop.prioritization.clone().ok_or_else(|| OrchestratorError::Storage {
            message: "prioritization missing after commit".to_string(),
        })?;

        let count = |status: ChallengeStatus| workshop.challenge_log.iter().filter(|e| e.status == status).count();
        let (champions, rest): (Vec<_>, Vec<_>) = prioritization
            .items
            .iter()
            .cloned()
            .partition(|item| item.quadrant == Quadrant::Champion);

        Ok(DashboardView {
            workshop: WorkshopOverview::from(&workshop),
            pending_challenges: count(ChallengeStatus::Pending),
            accepted_challenges: count(ChallengeStatus::Accepted),
            rejected_challenges: count(ChallengeStatus::Rejected),
            validation: workshop.validation_summary.clone(),
            recommendations: champions.into_iter().chain(rest).collect(),
            prioritization,
        })
    }

    pub async fn chat(&self, id: WorkshopId, request: ChatRequest) -> OrchestratorResult<ChatReply> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(OrchestratorError::invalid("message", "must not be empty"));
        }
        let workshop = self.repository.get(id).await?;

        let generation = chat_request(&workshop, &request.history, message);
        let generated = request_text(&self.generator, &generation, || chat_reply(&workshop, message)).await;
        workshop_debug!(id, mode = %generated.mode, "Chat reply produced");
        Ok(ChatReply {
            reply: generated.value,
            mode: generated.mode,
        })
    }
}
