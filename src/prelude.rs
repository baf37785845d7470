//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the kairo crate so hosts and
//! tests can bring the whole surface in with a single `use`.
//!
//! # Example
//!
//! ```rust,no_run
//! use kairo::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let workflow_json = std::fs::read_to_string("path/to/workflow.json")?;
//! let document: Document = serde_json::from_str(&workflow_json)?;
//!
//! let mut workspace = Workspace::new(document, NodeTypeRegistry::builtin());
//! let response = workspace.dispatch(CommandRequest::new(
//!     "validate",
//!     serde_json::Value::Null,
//! ));
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

// Command surface
pub use crate::command::{CommandRequest, Workspace};

// Mutation gateway and its wire types
pub use crate::gateway::{
    ChangeObserver, ConnectReport, CreateOptions, CreateReport, DeleteEdgesReport,
    DeleteNodesReport, EdgeMatcher, EdgeSpec, Gateway, NodeSpec, PersistenceMirror, SkippedEdge,
    SkippedNode, UpdateReport,
};

// Graph data model
pub use crate::graph::{
    DataKind, Document, Edge, GraphState, Handle, HandleDirection, Node, Position, Viewport,
};

// History engine
pub use crate::history::{History, Snapshot};

// Node type registry
pub use crate::registry::{NodeTypeRegistry, NodeTypeSpec};

// Validation engine
pub use crate::validate::{Classification, EdgeRejection, EdgeRule, EdgeValidator};

// Error types
pub use crate::error::{CommandError, GatewayError, HistoryError};

// Keyed maps used across the public API
pub use ahash::AHashMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
