//! Workflow visualization and data lineage records

use serde::{Deserialize, Serialize};

use super::UseCaseId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowVisualization {
    pub use_case_id: UseCaseId,
    pub steps: Vec<String>,
    /// Mermaid flowchart source for the steps
    pub diagram: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLineageEntry {
    pub use_case_id: UseCaseId,
    pub data_sources: Vec<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub explainability: String,
    pub observability: String,
    pub governance: String,
}
