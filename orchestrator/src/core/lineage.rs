//! Workflow visualizations and the data lineage derived from them

use generator::{UseCaseRef, WorkflowDraft, WorkflowDraftSet};
use shared::{DataLineageEntry, UseCase, WorkflowVisualization};

use super::similarity::find_referenced;

const HEAVY_COMPLEXITY: f64 = 7.0;
const LOW_DATA_READINESS: f64 = 3.0;

/// Mermaid left-to-right flowchart with one node per step
pub fn render_mermaid(steps: &[String]) -> String {
    let mut diagram = String::from("flowchart LR\n");
    for (i, step) in steps.iter().enumerate() {
        let label = step.trim().replace('"', "#quot;");
        diagram.push_str(&format!("    s{}[\"{label}\"]\n", i + 1));
    }
    for i in 1..steps.len() {
        diagram.push_str(&format!("    s{i} --> s{}\n", i + 1));
    }
    diagram
}

/// Workflow derived only from the use case's own fields
pub fn fallback_draft(use_case: &UseCase) -> WorkflowDraft {
    let title = use_case.title.trim();

    let mut data_sources = vec![format!("Systems of record supporting {title}")];
    if use_case.effort.data_readiness.is_some_and(|r| r <= LOW_DATA_READINESS) {
        data_sources.push("Departmental spreadsheets pending consolidation".to_string());
    }

    let inputs = if use_case.kpis.is_empty() {
        vec!["Historical operational data".to_string()]
    } else {
        use_case.kpis.iter().map(|kpi| format!("Baseline for {kpi}")).collect()
    };

    let mut outputs = vec![format!("{title} recommendations")];
    outputs.extend(use_case.kpis.iter().map(|kpi| format!("Tracked KPI: {kpi}")));

    let mut governance = "Human approval before actions are executed; quarterly model review.".to_string();
    if use_case.effort.complexity.is_some_and(|c| c >= HEAVY_COMPLEXITY) {
        governance.push_str(" Architecture review sign-off before each release.");
    }

    WorkflowDraft {
        target: UseCaseRef {
            use_case_id: Some(use_case.id.to_string()),
            use_case_title: Some(use_case.title.clone()),
        },
        steps: vec![
            "Collect source data".to_string(),
            "Validate and prepare features".to_string(),
            format!("Run {title} model"),
            "Review recommendations".to_string(),
            "Act and monitor outcomes".to_string(),
        ],
        data_sources,
        inputs,
        outputs,
        explainability: "Each recommendation lists its top contributing factors for reviewer sign-off.".to_string(),
        observability: "Input drift, model accuracy and KPI movement are reported weekly.".to_string(),
        governance,
    }
}

pub fn fallback_drafts(use_cases: &[UseCase]) -> WorkflowDraftSet {
    WorkflowDraftSet {
        workflows: use_cases.iter().map(fallback_draft).collect(),
    }
}

fn non_blank(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// One visualization and lineage entry per use case, in use-case order
///
/// Use cases the drafts do not cover get their fallback draft instead.
pub fn build(drafts: &WorkflowDraftSet, use_cases: &[UseCase]) -> (Vec<WorkflowVisualization>, Vec<DataLineageEntry>) {
    let mut workflows = Vec::with_capacity(use_cases.len());
    let mut lineage = Vec::with_capacity(use_cases.len());

    for use_case in use_cases {
        let generated = drafts
            .workflows
            .iter()
            .find(|draft| find_referenced(&draft.target, std::slice::from_ref(use_case)).is_some());
        let fallback;
        let draft = match generated {
            Some(draft) if !non_blank(&draft.steps).is_empty() => draft,
            _ => {
                fallback = fallback_draft(use_case);
                &fallback
            }
        };

        let steps = non_blank(&draft.steps);
        workflows.push(WorkflowVisualization {
            use_case_id: use_case.id,
            diagram: render_mermaid(&steps),
            steps,
        });
        lineage.push(DataLineageEntry {
            use_case_id: use_case.id,
            data_sources: non_blank(&draft.data_sources),
            inputs: non_blank(&draft.inputs),
            outputs: non_blank(&draft.outputs),
            explainability: draft.explainability.trim().to_string(),
            observability: draft.observability.trim().to_string(),
            governance: draft.governance.trim().to_string(),
        });
    }
    (workflows, lineage)
}
