//! Workshop state transitions
//!
//! Every change to a workshop document is one `WorkshopMutation`. Repositories
//! apply mutations one at a time per workshop against a working copy and only
//! commit it when the mutation succeeds, so a failed step leaves the stored
//! document untouched. Derived results (reconciliation, challenge entries,
//! validation, prioritization, lineage) are computed inside `apply` from the
//! document as it stands under the lock, never from a stale snapshot.

use chrono::{DateTime, Utc};
use generator::{BenefitAssessmentSet, ChallengeProposalSet, WorkflowDraftSet};
use shared::{
    BatchId, ChallengeId, Decision, GenerationMode, ImportedSource, ReadinessSurvey, SourceSystem, UseCaseEdit,
    UseCaseId, Workshop, WorkshopStatus,
};

use super::prioritization::PrioritizationEngine;
use super::reconciliation::ReconciliationEngine;
use super::validation::ValidationEngine;
use super::{challenge, lineage, scoring};
use crate::config::EngineConfig;
use crate::error::{OrchestratorError, OrchestratorResult};

#[derive(Debug, Clone)]
pub enum WorkshopMutation {
    AttachImport(ImportedSource),
    SetSurvey(ReadinessSurvey),
    Reconcile {
        config: EngineConfig,
    },
    EditUseCase {
        use_case_id: UseCaseId,
        edit: UseCaseEdit,
        config: EngineConfig,
    },
    AppendChallenges {
        batch_id: BatchId,
        proposals: ChallengeProposalSet,
    },
    ResolveChallenge {
        challenge_id: ChallengeId,
        decision: Decision,
        responded_by: String,
    },
    Validate {
        commentary: BenefitAssessmentSet,
        mode: GenerationMode,
        config: EngineConfig,
    },
    Prioritize {
        config: EngineConfig,
    },
    ReplaceWorkflows {
        drafts: WorkflowDraftSet,
    },
    SetStatus(WorkshopStatus),
}

impl WorkshopMutation {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            WorkshopMutation::AttachImport(_) => "attach_import",
            WorkshopMutation::SetSurvey(_) => "set_survey",
            WorkshopMutation::Reconcile { .. } => "reconcile",
            WorkshopMutation::EditUseCase { .. } => "edit_use_case",
            WorkshopMutation::AppendChallenges { .. } => "append_challenges",
            WorkshopMutation::ResolveChallenge { .. } => "resolve_challenge",
            WorkshopMutation::Validate { .. } => "validate",
            WorkshopMutation::Prioritize { .. } => "prioritize",
            WorkshopMutation::ReplaceWorkflows { .. } => "replace_workflows",
            WorkshopMutation::SetStatus(_) => "set_status",
        }
    }

    /// Apply to `workshop` in place, bumping its version on success
    ///
    /// Callers must discard `workshop` when this returns an error; it may be
    /// partially modified.
    pub fn apply(self, workshop: &mut Workshop, now: DateTime<Utc>) -> OrchestratorResult<()> {
        let is_step = !matches!(self, WorkshopMutation::SetStatus(_));

        match self {
            WorkshopMutation::AttachImport(import) => {
                match import.source {
                    SourceSystem::ResearchApp => {
                        workshop.research_report_id = Some(import.report_id.clone());
                        workshop.research_import = Some(import);
                    }
                    SourceSystem::CognitionTwo => {
                        workshop.cognition_report_id = Some(import.report_id.clone());
                        workshop.cognition_import = Some(import);
                    }
                }
            }
            WorkshopMutation::SetSurvey(survey) => {
                workshop.survey = Some(survey);
                workshop.invalidate_downstream();
            }
            WorkshopMutation::Reconcile { config } => {
                if !workshop.has_any_import() {
                    return Err(OrchestratorError::ImportMissing);
                }
                let research = workshop.research_import.as_ref().map(|i| i.use_cases.as_slice());
                let cognition = workshop.cognition_import.as_ref().map(|i| i.use_cases.as_slice());
                let outcome =
                    ReconciliationEngine::new(config).reconcile(workshop.id, research, cognition, &workshop.use_cases);

                workshop.use_cases = outcome.use_cases;
                workshop.invalidate_downstream();
                workshop.workflows.clear();
                workshop.data_lineage.clear();
            }
            WorkshopMutation::EditUseCase {
                use_case_id,
                edit,
                config,
            } => {
                edit.validate()?;
                let touches_scoring = edit.touches_scoring_inputs();
                let use_case = workshop
                    .use_cases
                    .iter_mut()
                    .find(|u| u.id == use_case_id)
                    .ok_or_else(|| OrchestratorError::not_found("use case", use_case_id))?;

                let mut edited: Vec<&str> = Vec::new();
                if let Some(title) = edit.title {
                    use_case.title = title.trim().to_string();
                    edited.push("title");
                }
                if let Some(description) = edit.description {
                    use_case.description = description;
                    edited.push("description");
                }
                let numeric_fields = [
                    ("costSavings", edit.benefits.cost_savings, &mut use_case.benefits.cost_savings),
                    ("riskReduction", edit.benefits.risk_reduction, &mut use_case.benefits.risk_reduction),
                    ("revenueImpact", edit.benefits.revenue_impact, &mut use_case.benefits.revenue_impact),
                    (
                        "cashFlowImprovement",
                        edit.benefits.cash_flow_improvement,
                        &mut use_case.benefits.cash_flow_improvement,
                    ),
                    ("complexity", edit.effort.complexity, &mut use_case.effort.complexity),
                    ("dataReadiness", edit.effort.data_readiness, &mut use_case.effort.data_readiness),
                    ("integrationEffort", edit.effort.integration_effort, &mut use_case.effort.integration_effort),
                ];
                for (name, value, slot) in numeric_fields {
                    if let Some(value) = value {
                        *slot = Some(value);
                        edited.push(name);
                    }
                }
                // Hand-edited fields no longer come from an import
                for name in edited {
                    use_case.provenance.remove(name);
                }

                scoring::rescore(use_case, None, &config);
                if touches_scoring {
                    workshop.invalidate_downstream();
                }
            }
            WorkshopMutation::AppendChallenges { batch_id, proposals } => {
                if workshop.use_cases.is_empty() {
                    return Err(OrchestratorError::missing("reconciled use cases"));
                }
                let entries = challenge::build_entries(&proposals, &workshop.use_cases, batch_id, now);
                workshop.challenge_log.extend(entries);
            }
            WorkshopMutation::ResolveChallenge {
                challenge_id,
                decision,
                responded_by,
            } => {
                let entry = workshop
                    .challenge_log
                    .iter_mut()
                    .find(|e| e.id == challenge_id)
                    .ok_or_else(|| OrchestratorError::not_found("challenge entry", challenge_id))?;
                challenge::resolve(entry, decision, &responded_by, now)?;
            }
            WorkshopMutation::Validate {
                commentary,
                mode,
                config,
            } => {
                let outcome = ValidationEngine::new(config).validate(
                    &workshop.use_cases,
                    workshop.survey.as_ref(),
                    &commentary,
                    mode,
                    now,
                )?;
                workshop.validation_results = outcome.results;
                workshop.validation_summary = Some(outcome.summary);
                workshop.prioritization = None;
            }
            WorkshopMutation::Prioritize { config } => {
                if workshop.use_cases.is_empty() {
                    return Err(OrchestratorError::missing("reconciled use cases"));
                }
                let (rescored, summary) =
                    PrioritizationEngine::new(config).prioritize(&workshop.use_cases, &workshop.validation_results, now);
                workshop.use_cases = rescored;
                workshop.prioritization = Some(summary);
            }
            WorkshopMutation::ReplaceWorkflows { drafts } => {
                if workshop.use_cases.is_empty() {
                    return Err(OrchestratorError::missing("reconciled use cases"));
                }
                let (workflows, data_lineage) = lineage::build(&drafts, &workshop.use_cases);
                workshop.workflows = workflows;
                workshop.data_lineage = data_lineage;
            }
            WorkshopMutation::SetStatus(next) => {
                if !workshop.status.can_transition_to(next) {
                    return Err(OrchestratorError::InvalidTransition {
                        from: workshop.status,
                        to: next,
                    });
                }
                workshop.status = next;
            }
        }

        if is_step && workshop.status == WorkshopStatus::Draft {
            workshop.status = WorkshopStatus::InProgress;
        }
        workshop.version += 1;
        workshop.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared::{ChallengeStatus, RawUseCase};

    fn workshop() -> Workshop {
        Workshop::new("Acme".into(), "Retail".into(), "Dana".into())
    }

    fn import(source: SourceSystem, titles: &[&str]) -> ImportedSource {
        ImportedSource {
            source,
            report_id: format!("{source}-1"),
            use_cases: titles
                .iter()
                .map(|t| RawUseCase {
                    title: t.to_string(),
                    ..RawUseCase::default()
                })
                .collect(),
            imported_at: Utc::now(),
        }
    }

    fn reconcile() -> WorkshopMutation {
        WorkshopMutation::Reconcile {
            config: EngineConfig::default(),
        }
    }

    #[test]
    fn test_reconcile_without_import_fails() {
        let mut doc = workshop();
        assert_matches!(reconcile().apply(&mut doc, Utc::now()), Err(OrchestratorError::ImportMissing));
    }

    #[test]
    fn test_first_step_moves_draft_in_progress() {
        let mut doc = workshop();
        WorkshopMutation::AttachImport(import(SourceSystem::ResearchApp, &["Churn prediction"]))
            .apply(&mut doc, Utc::now())
            .unwrap();
        assert_eq!(doc.status, WorkshopStatus::InProgress);
        assert_eq!(doc.version, 1);
        assert_eq!(doc.research_report_id.as_deref(), Some("ResearchApp-1"));
    }

    #[test]
    fn test_rereconcile_keeps_challenge_log_and_clears_derived_results() {
        let mut doc = workshop();
        let now = Utc::now();
        WorkshopMutation::AttachImport(import(SourceSystem::ResearchApp, &["Churn prediction"])).apply(&mut doc, now).unwrap();
        reconcile().apply(&mut doc, now).unwrap();
        doc.use_cases[0].benefits.cost_savings = Some(40_000.0);

        let proposals = challenge::fallback_proposals(&doc.use_cases);
        WorkshopMutation::AppendChallenges {
            batch_id: BatchId::new(),
            proposals,
        }
        .apply(&mut doc, now)
        .unwrap();
        WorkshopMutation::Prioritize {
            config: EngineConfig::default(),
        }
        .apply(&mut doc, now)
        .unwrap();
        assert!(doc.prioritization.is_some());

        let original_id = doc.use_cases[0].id;
        reconcile().apply(&mut doc, now).unwrap();
        assert_eq!(doc.use_cases[0].id, original_id);
        assert_eq!(doc.challenge_log.len(), 1);
        assert!(doc.prioritization.is_none());
    }

    #[test]
    fn test_edit_rescores_and_invalidates() {
        let mut doc = workshop();
        let now = Utc::now();
        WorkshopMutation::AttachImport(import(SourceSystem::CognitionTwo, &["Route optimization"])).apply(&mut doc, now).unwrap();
        reconcile().apply(&mut doc, now).unwrap();
        WorkshopMutation::Prioritize {
            config: EngineConfig::default(),
        }
        .apply(&mut doc, now)
        .unwrap();

        let id = doc.use_cases[0].id;
        let edit: UseCaseEdit = serde_json::from_value(serde_json::json!({"costSavings": 2_000_000, "complexity": 2})).unwrap();
        WorkshopMutation::EditUseCase {
            use_case_id: id,
            edit,
            config: EngineConfig::default(),
        }
        .apply(&mut doc, now)
        .unwrap();

        let edited = &doc.use_cases[0];
        assert_eq!(edited.benefits.cost_savings, Some(2_000_000.0));
        assert!(edited.value_score > 1.0);
        assert!(!edited.provenance.contains_key("complexity"));
        assert!(doc.prioritization.is_none());
    }

    #[test]
    fn test_edit_unknown_use_case_is_not_found() {
        let mut doc = workshop();
        let result = WorkshopMutation::EditUseCase {
            use_case_id: UseCaseId::new(),
            edit: UseCaseEdit::default(),
            config: EngineConfig::default(),
        }
        .apply(&mut doc, Utc::now());
        assert_matches!(result, Err(OrchestratorError::NotFound { entity: "use case", .. }));
    }

    #[test]
    fn test_resolve_challenge_once() {
        let mut doc = workshop();
        let now = Utc::now();
        WorkshopMutation::AttachImport(import(SourceSystem::ResearchApp, &["Fraud detection"])).apply(&mut doc, now).unwrap();
        reconcile().apply(&mut doc, now).unwrap();
        doc.use_cases[0].assumptions = vec!["Labels are reliable".to_string()];
        WorkshopMutation::AppendChallenges {
            batch_id: BatchId::new(),
            proposals: challenge::fallback_proposals(&doc.use_cases),
        }
        .apply(&mut doc, now)
        .unwrap();

        let challenge_id = doc.challenge_log[0].id;
        let resolve = |decision| WorkshopMutation::ResolveChallenge {
            challenge_id,
            decision,
            responded_by: "Dana".to_string(),
        };
        resolve(Decision::Accept).apply(&mut doc, now).unwrap();
        assert_eq!(doc.challenge_log[0].status, ChallengeStatus::Accepted);
        assert_matches!(
            resolve(Decision::Reject).apply(&mut doc, now),
            Err(OrchestratorError::AlreadyResolved { .. })
        );
    }

    #[test]
    fn test_status_transitions_are_checked() {
        let mut doc = workshop();
        assert_matches!(
            WorkshopMutation::SetStatus(WorkshopStatus::Completed).apply(&mut doc, Utc::now()),
            Err(OrchestratorError::InvalidTransition { .. })
        );
        WorkshopMutation::SetStatus(WorkshopStatus::InProgress).apply(&mut doc, Utc::now()).unwrap();
        WorkshopMutation::SetStatus(WorkshopStatus::Completed).apply(&mut doc, Utc::now()).unwrap();
        assert_eq!(doc.status, WorkshopStatus::Completed);
    }
}
