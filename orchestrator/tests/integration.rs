//! End-to-end workshop flows through the orchestrator
//!
//! Every step runs against the in-memory store, once with no provider
//! configured and once with a scripted provider.

use shared::{ChallengeStatus, Decision, FieldSource, GenerationMode, Quadrant, ResolveChallengeRequest, WorkshopStatus};

mod common;
use common::{OrchestratorBuilder, TestFixtures, TestHelpers};

/// Full facilitator journey with deterministic placeholder content
#[tokio::test]
async fn test_demo_mode_workshop_journey() {
    // Arrange
    let orchestrator = TestHelpers::demo_orchestrator();
    let workshop = TestHelpers::create_workshop(&orchestrator).await;
    assert_eq!(workshop.status, WorkshopStatus::Draft);
    assert!(!orchestrator.is_live());

    // Act - imports, survey and reconciliation
    let after_import = orchestrator.import_research(workshop.id, TestFixtures::research_import()).await.unwrap();
    orchestrator.import_cognition(workshop.id, TestFixtures::cognition_import()).await.unwrap();
    orchestrator.submit_survey(workshop.id, TestFixtures::survey()).await.unwrap();
    let reconciled = orchestrator.reconcile(workshop.id).await.unwrap();

    // Assert
    assert_eq!(after_import.status, WorkshopStatus::InProgress);
    assert_eq!(reconciled.use_cases.len(), 3);
    assert_eq!(reconciled.merged_count, 1);
    let invoice = reconciled
        .use_cases
        .iter()
        .find(|u| u.title == TestFixtures::SHARED_TITLE)
        .unwrap();
    assert_eq!(invoice.benefits.cost_savings, Some(250_000.0));
    assert_eq!(invoice.effort.complexity, Some(4.0));
    assert_eq!(invoice.provenance.get("complexity"), Some(&FieldSource::Both));
    assert_eq!(invoice.friction_points, vec!["Approvers work from email"]);

    // Act - challenge and resolve
    let challenges = orchestrator.run_challenge(workshop.id).await.unwrap();
    assert_eq!(challenges.mode, GenerationMode::Demo);
    assert!(challenges.entries.len() >= 3);
    assert!(challenges.entries.iter().all(|e| e.batch_id == challenges.batch_id));

    let first = &challenges.entries[0];
    let resolved = orchestrator
        .resolve_challenge(
            workshop.id,
            first.id,
            ResolveChallengeRequest {
                decision: Decision::Accept,
                responded_by: TestFixtures::FACILITATOR.to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(resolved.status, ChallengeStatus::Accepted);
    assert_eq!(resolved.responded_by.as_deref(), Some(TestFixtures::FACILITATOR));

    // Act - validate, prioritize, visualize
    let validation = orchestrator.validate(workshop.id).await.unwrap();
    assert_eq!(validation.results.len(), 3);
    assert_eq!(validation.summary.mode, GenerationMode::Demo);
    assert!(validation.results.iter().all(|r| r.validated_benefit <= r.original_benefit));
    assert!(validation.summary.total_validated_value <= validation.summary.total_original_value);

    let prioritization = orchestrator.prioritize(workshop.id).await.unwrap();
    let ranks: Vec<usize> = prioritization.items.iter().map(|i| i.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    let workflows = orchestrator.visualize_workflows(workshop.id).await.unwrap();
    assert_eq!(workflows.mode, GenerationMode::Demo);
    assert_eq!(workflows.workflows.len(), 3);
    assert!(workflows.workflows.iter().all(|w| w.diagram.starts_with("flowchart LR")));
    assert_eq!(orchestrator.lineage(workshop.id).await.unwrap().len(), 3);

    // Act - dashboard and chat
    let dashboard = orchestrator.dashboard(workshop.id).await.unwrap();
    assert_eq!(dashboard.accepted_challenges, 1);
    assert_eq!(dashboard.pending_challenges, challenges.entries.len() - 1);
    assert_eq!(dashboard.recommendations.len(), 3);
    assert!(dashboard.validation.is_some());

    let reply = orchestrator
        .chat(
            workshop.id,
            serde_json::from_value(serde_json::json!({"message": "What should we tackle first?"})).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(reply.mode, GenerationMode::Demo);
    assert!(reply.reply.contains(TestFixtures::COMPANY));
}

/// Generated content is used where it parses and replaced where it does not
#[tokio::test]
async fn test_live_provider_flow() {
    // Arrange
    let orchestrator = OrchestratorBuilder::new()
        .with_generator(TestHelpers::scripted_generator())
        .build();
    let workshop = TestHelpers::reconciled_workshop(&orchestrator).await;
    assert!(orchestrator.is_live());

    // Act
    let challenges = orchestrator.run_challenge(workshop.id).await.unwrap();
    let validation = orchestrator.validate(workshop.id).await.unwrap();
    let workflows = orchestrator.visualize_workflows(workshop.id).await.unwrap();
    let reply = orchestrator
        .chat(
            workshop.id,
            serde_json::from_value(serde_json::json!({"message": "Where do we start?"})).unwrap(),
        )
        .await
        .unwrap();

    // Assert - only the proposal that names a known use case survives
    assert_eq!(challenges.mode, GenerationMode::Live);
    assert_eq!(challenges.entries.len(), 1);
    assert_eq!(challenges.entries[0].severity, shared::Severity::High);
    assert_eq!(challenges.entries[0].challenged_value, "$150,000");

    assert_eq!(validation.summary.mode, GenerationMode::Live);
    let churn_id = workshop
        .use_cases
        .iter()
        .find(|u| u.title == "Customer churn prediction")
        .map(|u| u.id)
        .unwrap();
    let churn = validation.results.iter().find(|r| r.use_case_id == churn_id).unwrap();
    assert_eq!(churn.benchmark_source, "Distribution retention benchmark 2024");

    assert_eq!(workflows.mode, GenerationMode::Fallback);
    assert_eq!(workflows.workflows.len(), 3);

    assert_eq!(reply.mode, GenerationMode::Live);
    assert_eq!(reply.reply, TestFixtures::CHAT_REPLY);
}

/// A configured provider that keeps failing degrades to fallback, never errors
#[tokio::test]
async fn test_failing_provider_falls_back() {
    let orchestrator = OrchestratorBuilder::new()
        .with_generator(TestHelpers::failing_generator())
        .build();
    let workshop = TestHelpers::reconciled_workshop(&orchestrator).await;

    let challenges = orchestrator.run_challenge(workshop.id).await.unwrap();
    let validation = orchestrator.validate(workshop.id).await.unwrap();

    assert_eq!(challenges.mode, GenerationMode::Fallback);
    assert!(!challenges.entries.is_empty());
    assert_eq!(validation.summary.mode, GenerationMode::Fallback);
}

/// Re-importing and reconciling keeps the challenge log attached
#[tokio::test]
async fn test_rereconcile_preserves_challenge_history() {
    let orchestrator = TestHelpers::demo_orchestrator();
    let workshop = TestHelpers::reconciled_workshop(&orchestrator).await;
    let challenges = orchestrator.run_challenge(workshop.id).await.unwrap();
    orchestrator.validate(workshop.id).await.unwrap();

    orchestrator.import_research(workshop.id, TestFixtures::research_import()).await.unwrap();
    let again = orchestrator.reconcile(workshop.id).await.unwrap();
    let stored = orchestrator.get_workshop(workshop.id).await.unwrap();

    assert_eq!(stored.challenge_log.len(), challenges.entries.len());
    assert!(stored.validation_summary.is_none());
    let ids: Vec<_> = again.use_cases.iter().map(|u| u.id).collect();
    assert!(stored.challenge_log.iter().all(|e| ids.contains(&e.use_case_id)));
}

/// Editing scoring inputs invalidates the ranking; the dashboard recomputes it
#[tokio::test]
async fn test_edit_then_dashboard_recomputes_ranking() {
    let orchestrator = TestHelpers::demo_orchestrator();
    let workshop = TestHelpers::reconciled_workshop(&orchestrator).await;
    orchestrator.prioritize(workshop.id).await.unwrap();

    let supplier = workshop
        .use_cases
        .iter()
        .find(|u| u.title == "Supplier risk monitoring")
        .unwrap();
    let edit = serde_json::from_value(serde_json::json!({
        "riskReduction": 9000000,
        "complexity": 2,
        "dataReadiness": 9,
        "integrationEffort": 2
    }))
    .unwrap();
    let edited = orchestrator.edit_use_case(workshop.id, supplier.id, edit).await.unwrap();
    assert!(edited.value_score >= 7.0);
    assert!(orchestrator.get_workshop(workshop.id).await.unwrap().prioritization.is_none());

    let dashboard = orchestrator.dashboard(workshop.id).await.unwrap();
    let top = &dashboard.recommendations[0];
    assert_eq!(top.use_case_id, supplier.id);
    assert_eq!(top.quadrant, Quadrant::Champion);
}
