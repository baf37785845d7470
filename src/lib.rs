//! # Kairo - Workflow Graph Engine
//!
//! **Kairo** is the structural core of a node-based editor for AI-generation
//! pipelines. It owns the graph data model (typed nodes, directional handles,
//! content-addressed edges), keeps every mutation structurally valid, and makes
//! the full mutation history reversible through bounded undo/redo snapshots.
//!
//! ## Core Workflow
//!
//! The engine is host-agnostic: a canvas UI and an automated agent drive it
//! through the same command surface. The primary workflow is:
//!
//! 1.  **Load or create a Document**: parse a persisted workflow JSON into a
//!     [`graph::Document`], or start from [`graph::Document::empty`].
//! 2.  **Open a Workspace**: couple the document with a
//!     [`registry::NodeTypeRegistry`] describing the node types the host
//!     permits. The workspace wires the mutation gateway and the history
//!     engine together.
//! 3.  **Dispatch commands**: every change (create, connect, update, delete,
//!     clear) goes through [`command::Workspace::dispatch`], which validates
//!     edges, applies the mutation atomically, and records an undo snapshot.
//! 4.  **Undo/redo freely**: each externally-visible mutation is individually
//!     reversible; history depth is bounded so large sessions stay cheap.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kairo::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // An empty workflow plus the builtin generation node types.
//!     let document = Document::empty("storyboard");
//!     let mut workspace = Workspace::new(document, NodeTypeRegistry::builtin());
//!
//!     // Both the UI and an agent speak the same JSON command contract.
//!     let response = workspace.dispatch_json(
//!         r#"{
//!             "command": "create",
//!             "arguments": {
//!                 "nodes": [
//!                     { "id": "prompt", "type": "text" },
//!                     { "id": "render", "type": "image" }
//!                 ],
//!                 "edges": [ { "source": "prompt", "target": "render" } ]
//!             }
//!         }"#,
//!     );
//!     println!("{response}");
//!
//!     // The create above took a snapshot first, so it is undoable.
//!     workspace.undo()?;
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod error;
pub mod gateway;
pub mod graph;
pub mod history;
pub mod prelude;
pub mod registry;
pub mod validate;
