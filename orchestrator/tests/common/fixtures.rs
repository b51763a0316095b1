//! Test fixtures and data for orchestrator tests
//!
//! Import payloads, survey answers and scripted provider replies shared by
//! every test suite.

use serde_json::json;
use shared::{ImportRequest, SurveySubmission};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const COMPANY: &'static str = "Northwind Traders";
    pub const INDUSTRY: &'static str = "Distribution";
    pub const FACILITATOR: &'static str = "Sam Rivera";

    /// Title shared by one research and one cognition entry
    pub const SHARED_TITLE: &'static str = "Invoice Processing Automation";

    pub fn research_import() -> ImportRequest {
        serde_json::from_value(json!({
            "reportId": "research-2024-07",
            "useCases": [
                {
                    "title": Self::SHARED_TITLE,
                    "description": "Extract and match supplier invoices against purchase orders",
                    "costSavings": 250000,
                    "complexity": 3,
                    "dataReadiness": 8,
                    "integrationEffort": 4,
                    "assumptions": ["Invoice layouts are stable"],
                    "kpis": ["Touchless invoice rate"]
                },
                {
                    "title": "Customer churn prediction",
                    "description": "Flag accounts likely to lapse within 90 days",
                    "revenueImpact": 1200000,
                    "complexity": 6,
                    "dataReadiness": 5,
                    "integrationEffort": 5,
                    "kpis": ["Retention rate"]
                }
            ]
        }))
        .unwrap()
    }

    pub fn cognition_import() -> ImportRequest {
        serde_json::from_value(json!({
            "reportId": "cognition-88",
            "useCases": [
                {
                    "title": Self::SHARED_TITLE,
                    "description": "AP clerks spend most of their week keying invoices",
                    "costSavings": 400000,
                    "complexity": 5,
                    "behavioralPatterns": ["Manual re-keying of PDFs"],
                    "frictionPoints": ["Approvers work from email"]
                },
                {
                    "title": "Supplier risk monitoring",
                    "description": "Watch supplier news and payment behaviour",
                    "riskReduction": 80000,
                    "complexity": 8,
                    "dataReadiness": 3,
                    "integrationEffort": 8,
                    "frictionPoints": ["No single supplier master"]
                }
            ]
        }))
        .unwrap()
    }

    pub fn survey() -> SurveySubmission {
        serde_json::from_value(json!({
            "respondent": "CFO",
            "dataMaturity": 3,
            "processMaturity": 4,
            "organizationalMaturity": 3,
            "technicalMaturity": 2,
            "notes": "ERP upgrade planned next year"
        }))
        .unwrap()
    }

    /// Fenced challenge payload; the second proposal references nothing known
    pub fn challenge_reply() -> String {
        let body = json!({
            "challenges": [
                {
                    "useCaseTitle": Self::SHARED_TITLE,
                    "type": "benefit",
                    "originalValue": 325000,
                    "challengedValue": "$150,000",
                    "evidence": "Peer AP automation programmes report lower first-year savings."
                },
                {
                    "useCaseId": "00000000-0000-4000-8000-000000000000",
                    "type": "kpi",
                    "originalValue": "Throughput",
                    "challengedValue": "Throughput per clerk",
                    "evidence": "Unknown use case"
                }
            ]
        });
        format!("Here is my review:\n```json\n{body}\n```")
    }

    pub fn benefit_reply() -> String {
        json!({
            "assessments": [
                {
                    "useCaseTitle": "customer churn prediction",
                    "benchmarkSource": "Distribution retention benchmark 2024",
                    "adjustmentReason": "Retention uplift in peers averaged 2-3 points."
                }
            ]
        })
        .to_string()
    }

    pub const CHAT_REPLY: &'static str = "Start with invoice automation; it is the quickest win.";
}
