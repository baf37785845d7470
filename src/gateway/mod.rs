//! Mutation gateway: the single choke-point through which all graph changes
//! pass.
//!
//! Every operation is a synchronous, total transformation of the whole
//! document. Validation runs against the proposed next state before commit,
//! so no operation can leave the document half-mutated; failures come back as
//! data, not exceptions.

mod connect;
mod create;
mod report;
mod update;

pub use report::{
    ConnectReport, CreateReport, DeleteEdgesReport, DeleteNodesReport, SkippedEdge, SkippedNode,
    UpdateReport,
};

use crate::error::GatewayError;
use crate::graph::{DataKind, Document, Handle, Position};
use crate::registry::NodeTypeRegistry;
use serde::Deserialize;

/// Request to create one node. Absent fields are resolved by the gateway:
/// ids get collision-free suffixes, positions come from the deterministic
/// grid layout, the data map starts from the node type's template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "nodeType")]
    pub node_type: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Option<ahash::AHashMap<String, serde_json::Value>>,
    #[serde(default)]
    pub handles: Option<Vec<Handle>>,
    #[serde(default, alias = "executionOrder")]
    pub execution_order: Option<u32>,
}

/// Request to connect two nodes. Handles may be omitted; the gateway resolves
/// them against the endpoints' declarations, optionally steered by a
/// `dataType` hint.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeSpec {
    pub source: String,
    pub target: String,
    #[serde(default, alias = "sourceHandle")]
    pub source_handle: Option<String>,
    #[serde(default, alias = "targetHandle")]
    pub target_handle: Option<String>,
    #[serde(default, alias = "dataType")]
    pub data_type: Option<DataKind>,
}

/// Selects edges for deletion. Handle constraints are optional; a matcher
/// without one matches edges regardless of that handle.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeMatcher {
    pub source: String,
    pub target: String,
    #[serde(default, alias = "sourceHandle")]
    pub source_handle: Option<String>,
    #[serde(default, alias = "targetHandle")]
    pub target_handle: Option<String>,
}

impl EdgeMatcher {
    pub fn matches(&self, edge: &crate::graph::Edge) -> bool {
        edge.source == self.source
            && edge.target == self.target
            && self
                .source_handle
                .as_deref()
                .map_or(true, |h| h == edge.source_handle)
            && self
                .target_handle
                .as_deref()
                .map_or(true, |h| h == edge.target_handle)
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CreateOptions {
    /// Discard the existing document (and its persisted mirror) before
    /// inserting the new nodes.
    #[serde(default)]
    pub replace: bool,
}

/// External key-value mirror of the persisted workflow. The gateway only ever
/// clears it (on `replace` and `clear`); writing is the persistence
/// collaborator's job, triggered by change notifications.
pub trait PersistenceMirror {
    fn clear(&mut self);
}

/// Mirror used when the host does not supply one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMirror;

impl PersistenceMirror for NullMirror {
    fn clear(&mut self) {}
}

/// Receives a notification after every committed mutation.
pub trait ChangeObserver {
    fn document_changed(&mut self, document: &Document);
}

/// Owns the live document and performs every mutation on it.
pub struct Gateway {
    document: Document,
    registry: NodeTypeRegistry,
    mirror: Box<dyn PersistenceMirror>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl Gateway {
    pub fn new(document: Document, registry: NodeTypeRegistry) -> Gateway {
        Gateway::with_mirror(document, registry, Box::new(NullMirror))
    }

    pub fn with_mirror(
        document: Document,
        registry: NodeTypeRegistry,
        mirror: Box<dyn PersistenceMirror>,
    ) -> Gateway {
        Gateway {
            document,
            registry,
            mirror,
            observers: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    pub fn add_observer(&mut self, observer: Box<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    /// Empties the document and the mirror. Destructive, so the explicit
    /// confirmation flag is required; without it nothing happens at all.
    pub fn clear(&mut self, confirm: bool) -> Result<(), GatewayError> {
        if !confirm {
            return Err(GatewayError::ConfirmationRequired { operation: "clear" });
        }
        self.document.nodes.clear();
        self.document.edges.clear();
        self.mirror.clear();
        log::info!("cleared document '{}'", self.document.name);
        self.notify();
        Ok(())
    }

    pub(crate) fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub(crate) fn notify(&mut self) {
        debug_assert!(self.document.is_structurally_consistent());
        for observer in &mut self.observers {
            observer.document_changed(&self.document);
        }
    }

    pub(crate) fn clear_mirror(&mut self) {
        self.mirror.clear();
    }
}
