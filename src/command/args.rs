//! Wire-level argument structs for the command surface.
//!
//! These match the JSON payloads produced by the editor UI and by agent
//! callers; camelCase spellings are accepted through aliases on the
//! underlying spec types.

use ahash::AHashMap;
use serde::Deserialize;

use crate::gateway::{CreateOptions, EdgeMatcher, EdgeSpec, NodeSpec};

#[derive(Debug, Default, Deserialize)]
pub struct CreateArgs {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub options: CreateOptions,
}

#[derive(Debug, Deserialize)]
pub struct ConnectArgs {
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Deserialize)]
pub struct GetNodeArgs {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNodeArgs {
    pub id: String,
    #[serde(default)]
    pub data: Option<AHashMap<String, serde_json::Value>>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNodesArgs {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteEdgesArgs {
    pub edges: Vec<EdgeMatcher>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearArgs {
    #[serde(default)]
    pub confirm: bool,
}
