use ahash::AHashMap;
use serde::Serialize;

use crate::graph::Edge;

/// A node spec the gateway could not honor, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedNode {
    pub requested_id: Option<String>,
    pub node_type: String,
    pub reason: String,
}

/// An edge spec that did not survive resolution or validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEdge {
    pub source: String,
    pub target: String,
    pub reason: String,
}

/// Outcome of a bulk create: what was applied and what was skipped, so a
/// caller can retry just the rejected subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReport {
    /// Final ids of the created nodes, in creation order.
    pub created: Vec<String>,
    /// Requested id (or generated placeholder) to final id, including
    /// collision renames.
    pub id_map: AHashMap<String, String>,
    /// Edges accepted by validation and now present in the document.
    pub edges: Vec<Edge>,
    pub skipped_nodes: Vec<SkippedNode>,
    pub skipped_edges: Vec<SkippedEdge>,
}

/// Outcome of a connect call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectReport {
    /// Accepted edges. An edge whose derived id already existed is reported
    /// here but never duplicated in the document.
    pub edges: Vec<Edge>,
    pub skipped: Vec<SkippedEdge>,
}

/// Outcome of a node update, carrying the displaced values for inspection.
/// Rollback is the history engine's job, not this report's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub node_id: String,
    /// Previous value of every data key the patch overwrote. Keys that were
    /// newly introduced do not appear.
    pub previous_data: AHashMap<String, serde_json::Value>,
    pub label_replaced: bool,
    pub previous_label: Option<String>,
}

/// Outcome of a node deletion batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNodesReport {
    pub deleted: Vec<String>,
    /// Requested ids that did not exist; their presence never fails the
    /// batch.
    pub missing: Vec<String>,
    /// Ids of edges removed by the cascade.
    pub removed_edges: Vec<String>,
}

/// Outcome of an edge deletion batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEdgesReport {
    pub deleted: Vec<String>,
    /// Matchers that selected nothing.
    pub unmatched: usize,
}
