use crate::graph::{DataKind, Handle, HandleDirection, Node};
use crate::registry::NodeTypeRegistry;

/// The role a handle plays on an edge description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRole {
    Source,
    Target,
}

impl EdgeRole {
    /// The handle direction an edge needs on this side.
    pub fn required_direction(self) -> HandleDirection {
        match self {
            EdgeRole::Source => HandleDirection::Output,
            EdgeRole::Target => HandleDirection::Input,
        }
    }
}

/// A handle description produced by the resolution chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedHandle {
    pub direction: HandleDirection,
    pub kind: DataKind,
    /// True when no declaration was found and the handle was synthesized
    /// from the edge role alone.
    pub synthesized: bool,
}

/// Resolves a handle id on a node through an ordered chain of sources:
/// the instance-level handle list, then the node type's default declaration,
/// then a synthesized wildcard whose direction follows the edge role.
///
/// The chain is total on purpose: absent kind metadata alone must never make
/// an edge invalid.
pub struct HandleResolver<'a> {
    registry: &'a NodeTypeRegistry,
}

impl<'a> HandleResolver<'a> {
    pub fn new(registry: &'a NodeTypeRegistry) -> HandleResolver<'a> {
        HandleResolver { registry }
    }

    pub fn resolve(&self, node: &Node, handle_id: &str, role: EdgeRole) -> ResolvedHandle {
        let default = self
            .registry
            .default_handles(&node.node_type)
            .iter()
            .find(|h| h.id == handle_id);
        let declared = node.instance_handle(handle_id).or(default);

        match declared {
            Some(handle) => ResolvedHandle {
                direction: handle.direction,
                // An instance declaration without a kind still inherits the
                // default declaration's kind before falling back to the
                // wildcard.
                kind: handle
                    .kind
                    .or_else(|| default.and_then(|d| d.kind))
                    .unwrap_or(DataKind::Any),
                synthesized: false,
            },
            None => ResolvedHandle {
                direction: role.required_direction(),
                kind: DataKind::Any,
                synthesized: true,
            },
        }
    }

    /// The effective handle list of a node: the instance declaration when one
    /// exists, otherwise the node type's defaults.
    pub fn declared_handles(&self, node: &'a Node) -> &'a [Handle] {
        if node.handles.is_empty() {
            self.registry.default_handles(&node.node_type)
        } else {
            &node.handles
        }
    }
}
