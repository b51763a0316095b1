//! Role instructions and task payloads for each generation-backed step
//!
//! Prompts stay deliberately small: a role line, the expected JSON shape and
//! the workshop data the model needs. Everything the engines rely on is
//! validated after the fact, so nothing here is load-bearing for correctness.

use serde_json::{json, Value};
use shared::{ChatTurn, ReadinessSurvey, UseCase, Workshop};

use crate::types::GenerationRequest;

const CHALLENGE_ROLE: &str = "You are a skeptical AI strategy advisor reviewing proposed AI use cases. \
For each use case, challenge weak assumptions, unrealistic KPIs, understated friction and inflated benefits. \
Respond only with JSON of the form {\"challenges\": [{\"useCaseId\": string, \"type\": \"assumption\"|\"kpi\"|\"friction\"|\"benefit\", \
\"originalValue\": string|number, \"challengedValue\": string|number, \"evidence\": string}]}.";

const BENEFIT_ROLE: &str = "You are a financial analyst benchmarking AI use-case benefits against industry evidence. \
Respond only with JSON of the form {\"assessments\": [{\"useCaseId\": string, \"benchmarkSource\": string, \
\"adjustmentReason\": string}]}. Do not restate numbers; they are computed separately.";

const WORKFLOW_ROLE: &str = "You are a solutions architect describing how each AI use case runs in production. \
Respond only with JSON of the form {\"workflows\": [{\"useCaseId\": string, \"steps\": [string], \"dataSources\": [string], \
\"inputs\": [string], \"outputs\": [string], \"explainability\": string, \"observability\": string, \"governance\": string}]}.";

const CHAT_ROLE: &str = "You are a workshop assistant helping a facilitator discuss AI use cases with a portfolio company. \
Answer concisely using the workshop context provided.";

/// Compact view of a use case for prompt payloads
fn use_case_brief(use_case: &UseCase) -> Value {
    json!({
        "useCaseId": use_case.id.to_string(),
        "title": use_case.title,
        "description": use_case.description,
        "costSavings": use_case.benefits.cost_savings,
        "riskReduction": use_case.benefits.risk_reduction,
        "revenueImpact": use_case.benefits.revenue_impact,
        "cashFlowImprovement": use_case.benefits.cash_flow_improvement,
        "complexity": use_case.effort.complexity,
        "dataReadiness": use_case.effort.data_readiness,
        "integrationEffort": use_case.effort.integration_effort,
        "assumptions": use_case.assumptions,
        "kpis": use_case.kpis,
        "frictionPoints": use_case.friction_points,
    })
}

fn company_context(workshop: &Workshop) -> Value {
    json!({
        "companyName": workshop.company_name,
        "industry": workshop.industry,
    })
}

pub fn challenge_request(workshop: &Workshop, use_cases: &[UseCase]) -> GenerationRequest {
    GenerationRequest::new(
        CHALLENGE_ROLE,
        json!({
            "company": company_context(workshop),
            "useCases": use_cases.iter().map(use_case_brief).collect::<Vec<_>>(),
        }),
    )
}

pub fn benefit_request(workshop: &Workshop, use_cases: &[UseCase], survey: &ReadinessSurvey) -> GenerationRequest {
    GenerationRequest::new(
        BENEFIT_ROLE,
        json!({
            "company": company_context(workshop),
            "readiness": {
                "dataMaturity": survey.data_maturity,
                "processMaturity": survey.process_maturity,
                "organizationalMaturity": survey.organizational_maturity,
                "technicalMaturity": survey.technical_maturity,
            },
            "useCases": use_cases.iter().map(use_case_brief).collect::<Vec<_>>(),
        }),
    )
    .with_temperature(0.2)
}

pub fn workflow_request(workshop: &Workshop, use_cases: &[UseCase]) -> GenerationRequest {
    GenerationRequest::new(
        WORKFLOW_ROLE,
        json!({
            "company": company_context(workshop),
            "useCases": use_cases.iter().map(use_case_brief).collect::<Vec<_>>(),
        }),
    )
    .with_max_tokens(3000)
}

/// Chat turns are flattened into a single transcript payload
pub fn chat_request(workshop: &Workshop, history: &[ChatTurn], message: &str) -> GenerationRequest {
    let mut transcript = String::new();
    for turn in history {
        transcript.push_str(&format!("{}: {}\n", turn.role, turn.content));
    }
    transcript.push_str(&format!("user: {message}"));

    let titles: Vec<&str> = workshop.use_cases.iter().map(|u| u.title.as_str()).collect();
    let context = json!({
        "company": company_context(workshop),
        "status": workshop.status.to_string(),
        "useCases": titles,
        "pendingChallenges": workshop.pending_challenges(),
    });

    GenerationRequest::new(
        CHAT_ROLE,
        Value::String(format!("Workshop context:\n{context}\n\nConversation:\n{transcript}")),
    )
    .with_max_tokens(800)
    .with_temperature(0.6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workshop_with_use_case() -> Workshop {
        let mut workshop = Workshop::new("Acme".into(), "Logistics".into(), "Dana".into());
        let mut use_case = UseCase::new(workshop.id, "Route optimization");
        use_case.benefits.cost_savings = Some(250_000.0);
        workshop.use_cases.push(use_case);
        workshop
    }

    #[test]
    fn test_challenge_payload_lists_use_cases() {
        let workshop = workshop_with_use_case();
        let request = challenge_request(&workshop, &workshop.use_cases);
        let cases = request.payload["useCases"].as_array().unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0]["title"], "Route optimization");
        assert_eq!(cases[0]["costSavings"], 250_000.0);
        assert!(request.instructions.contains("\"challenges\""));
    }

    #[test]
    fn test_chat_payload_is_plain_text() {
        let workshop = workshop_with_use_case();
        let history = vec![ChatTurn {
            role: "assistant".to_string(),
            content: "Hello".to_string(),
        }];
        let request = chat_request(&workshop, &history, "Which use case first?");
        let body = request.user_message();
        assert!(body.contains("assistant: Hello"));
        assert!(body.ends_with("user: Which use case first?"));
        assert!(body.contains("Route optimization"));
    }
}
