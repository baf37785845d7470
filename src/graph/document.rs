use crate::graph::edge::Edge;
use crate::graph::node::Node;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Current persisted schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// The visible canvas region, persisted with the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// The full workflow graph at one point in time.
///
/// Node order is the visual/priority ordering, not execution order. Edges are
/// unique by their derived id and each must stay consistent with its own
/// endpoints; the mutation gateway is the only writer.
///
/// The serde representation is the persisted workflow shape
/// (`{ id, name, schemaVersion, nodes, edges, viewport, metadata }`) and
/// round-trips it without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub schema_version: u32,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub metadata: AHashMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(id: &str, name: &str) -> Document {
        Document {
            id: id.to_string(),
            name: name.to_string(),
            schema_version: SCHEMA_VERSION,
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
            metadata: AHashMap::new(),
        }
    }

    /// A fresh workflow with no nodes and no edges, the shape the editor
    /// seeds new documents with.
    pub fn empty(name: &str) -> Document {
        Document::new(name, name)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edges.iter().any(|e| e.id == id)
    }

    /// Removes the named nodes and cascade-removes every edge touching any of
    /// them. Returns the removed nodes and edges.
    pub fn remove_nodes(&mut self, ids: &AHashSet<String>) -> (Vec<Node>, Vec<Edge>) {
        let (kept_nodes, removed_nodes): (Vec<Node>, Vec<Node>) = self
            .nodes
            .drain(..)
            .partition(|node| !ids.contains(&node.id));
        self.nodes = kept_nodes;

        let (kept_edges, removed_edges): (Vec<Edge>, Vec<Edge>) = self
            .edges
            .drain(..)
            .partition(|edge| !ids.contains(&edge.source) && !ids.contains(&edge.target));
        self.edges = kept_edges;

        (removed_nodes, removed_edges)
    }

    /// Clones the undoable portion of the document.
    pub fn graph_state(&self) -> GraphState {
        GraphState {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Replaces the undoable portion of the document. Metadata and viewport
    /// are not part of history and stay untouched.
    pub fn restore_state(&mut self, state: GraphState) {
        self.nodes = state.nodes;
        self.edges = state.edges;
    }

    /// Structural consistency check: unique node ids, unique edge ids, every
    /// edge endpoint present, every edge id matching its own endpoints.
    pub fn is_structurally_consistent(&self) -> bool {
        let mut node_ids: AHashSet<&str> = AHashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id.as_str()) {
                return false;
            }
        }

        let mut edge_ids: AHashSet<&str> = AHashSet::with_capacity(self.edges.len());
        for edge in &self.edges {
            if !node_ids.contains(edge.source.as_str()) || !node_ids.contains(edge.target.as_str())
            {
                return false;
            }
            let derived =
                Edge::derive_id(&edge.source, &edge.source_handle, &edge.target, &edge.target_handle);
            if edge.id != derived {
                return false;
            }
            if !edge_ids.insert(edge.id.as_str()) {
                return false;
            }
        }
        true
    }
}

/// The undoable portion of a document: nodes and edges, nothing else.
///
/// Snapshot captures compare with `==`, which is order-independent for the
/// nodes' data maps, so a reverted map never reads as a structural change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}
