//! Edge validation engine.
//!
//! Given a candidate edge set and the current node set, decides which edges
//! are legal and assigns blame to illegal ones. The engine never mutates its
//! inputs and never fails: every candidate ends up either accepted or
//! rejected with the full ordered list of violated rules.

mod resolver;

pub use resolver::{EdgeRole, HandleResolver, ResolvedHandle};

use crate::graph::{DataKind, Document, Edge, HandleDirection, Node};
use crate::registry::NodeTypeRegistry;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// The connection rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeRule {
    #[serde(rename = "direction-mismatch")]
    DirectionMismatch,
    #[serde(rename = "distinct-handles")]
    DistinctHandles,
    #[serde(rename = "no-self-loop")]
    NoSelfLoop,
    #[serde(rename = "kind-match")]
    KindMatch,
}

impl EdgeRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeRule::DirectionMismatch => "direction-mismatch",
            EdgeRule::DistinctHandles => "distinct-handles",
            EdgeRule::NoSelfLoop => "no-self-loop",
            EdgeRule::KindMatch => "kind-match",
        }
    }
}

impl fmt::Display for EdgeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected candidate with every rule it violated, in evaluation order,
/// plus a human-readable detail for reports.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeRejection {
    pub edge: Edge,
    pub reasons: Vec<EdgeRule>,
    pub detail: String,
}

impl EdgeRejection {
    /// The violated rule names joined for one-line reports.
    pub fn summary(&self) -> String {
        self.reasons.iter().join(", ")
    }
}

/// The complete classification of a candidate set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification {
    pub accepted: Vec<Edge>,
    pub rejected: Vec<EdgeRejection>,
}

impl Classification {
    pub fn is_fully_valid(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validates candidate edges against a node set and a node type registry.
pub struct EdgeValidator<'a> {
    resolver: HandleResolver<'a>,
}

impl<'a> EdgeValidator<'a> {
    pub fn new(registry: &'a NodeTypeRegistry) -> EdgeValidator<'a> {
        EdgeValidator {
            resolver: HandleResolver::new(registry),
        }
    }

    /// Classifies every candidate. An edge is accepted only if all rules
    /// pass; rejections report all violations, not just the first.
    pub fn classify(&self, candidates: &[Edge], nodes: &[Node]) -> Classification {
        let mut classification = Classification::default();
        for edge in candidates {
            match self.check_edge(edge, nodes) {
                None => classification.accepted.push(edge.clone()),
                Some(rejection) => classification.rejected.push(rejection),
            }
        }
        classification
    }

    /// Classifies the edges already present in a document, for read-only
    /// consistency reports.
    pub fn classify_document(&self, document: &Document) -> Classification {
        self.classify(&document.edges, &document.nodes)
    }

    fn check_edge(&self, edge: &Edge, nodes: &[Node]) -> Option<EdgeRejection> {
        let mut reasons = Vec::new();
        let mut details: Vec<String> = Vec::new();

        let source_node = nodes.iter().find(|n| n.id == edge.source);
        let target_node = nodes.iter().find(|n| n.id == edge.target);

        let source_handle = source_node
            .map(|n| self.resolver.resolve(n, &edge.source_handle, EdgeRole::Source));
        let target_handle = target_node
            .map(|n| self.resolver.resolve(n, &edge.target_handle, EdgeRole::Target));

        // direction-mismatch: both resolved handles must face the right way.
        // A missing endpoint node means no handle of the required direction
        // can be resolved at all, which is blamed on the same rule.
        let mut direction_faults: Vec<String> = Vec::new();
        match (source_node, &source_handle) {
            (None, _) => {
                direction_faults.push(format!("source node '{}' does not exist", edge.source))
            }
            (Some(_), Some(resolved)) if resolved.direction != HandleDirection::Output => {
                direction_faults.push(format!(
                    "source handle '{}' on '{}' is not an output",
                    edge.source_handle, edge.source
                ));
            }
            _ => {}
        }
        match (target_node, &target_handle) {
            (None, _) => {
                direction_faults.push(format!("target node '{}' does not exist", edge.target))
            }
            (Some(_), Some(resolved)) if resolved.direction != HandleDirection::Input => {
                direction_faults.push(format!(
                    "target handle '{}' on '{}' is not an input",
                    edge.target_handle, edge.target
                ));
            }
            _ => {}
        }
        if !direction_faults.is_empty() {
            reasons.push(EdgeRule::DirectionMismatch);
            details.extend(direction_faults);
        }

        // distinct-handles: the same handle id on both ends marks a malformed
        // description.
        if edge.source_handle == edge.target_handle {
            reasons.push(EdgeRule::DistinctHandles);
            details.push(format!(
                "handle '{}' is referenced as both source and target",
                edge.source_handle
            ));
        }

        // no-self-loop
        if edge.source == edge.target {
            reasons.push(EdgeRule::NoSelfLoop);
            details.push(format!("node '{}' cannot connect to itself", edge.source));
        }

        // kind-match, assessable only when both endpoints resolved.
        if let (Some(source), Some(target)) = (&source_handle, &target_handle) {
            if !DataKind::compatible(source.kind, target.kind) {
                reasons.push(EdgeRule::KindMatch);
                details.push(format!(
                    "kind '{}' cannot feed kind '{}'",
                    source.kind, target.kind
                ));
            }
        }

        if reasons.is_empty() {
            None
        } else {
            Some(EdgeRejection {
                edge: edge.clone(),
                reasons,
                detail: details.iter().join("; "),
            })
        }
    }
}
