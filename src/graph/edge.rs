use serde::{Deserialize, Serialize};

/// A directed connection from an output handle to an input handle.
///
/// Identity is content-addressed: the id is derived deterministically from the
/// four endpoint fields, so re-deriving an edge for the same endpoints always
/// yields the same id and duplicate parallel edges cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
    /// Transient flag owned by the execution layer; not interpreted here.
    #[serde(default)]
    pub is_processing: bool,
}

impl Edge {
    /// Derives the canonical id for a pair of endpoints.
    pub fn derive_id(
        source: &str,
        source_handle: &str,
        target: &str,
        target_handle: &str,
    ) -> String {
        format!("{}-{}-{}-{}", source, source_handle, target, target_handle)
    }

    /// Builds an edge with its canonical id.
    pub fn between(source: &str, source_handle: &str, target: &str, target_handle: &str) -> Edge {
        Edge {
            id: Edge::derive_id(source, source_handle, target, target_handle),
            source: source.to_string(),
            source_handle: source_handle.to_string(),
            target: target.to_string(),
            target_handle: target_handle.to_string(),
            is_processing: false,
        }
    }

    /// True when the edge starts or ends at the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
