//! Common test utilities for building registries, documents and workspaces.
use kairo::prelude::*;
use serde_json::json;

/// A registry matching the canonical editor scenario: a text generator with
/// a single `text` output, and an image generator with a single `text`
/// prompt input.
#[allow(dead_code)]
pub fn scenario_registry() -> NodeTypeRegistry {
    NodeTypeRegistry::new()
        .with_type(NodeTypeSpec::new(
            "text",
            vec![Handle::output("text-out", DataKind::Text)],
            json!({ "prompt": "" }),
        ))
        .with_type(NodeTypeSpec::new(
            "image",
            vec![Handle::input("prompt-in", DataKind::Text)],
            json!({ "model": null }),
        ))
}

/// A workspace over the scenario registry holding nodes `A` (text) and `B`
/// (image), not yet connected.
#[allow(dead_code)]
pub fn scenario_workspace() -> Workspace {
    let mut workspace = Workspace::new(Document::empty("scenario"), scenario_registry());
    let report = workspace.gateway_mut().create_nodes(
        &[node_spec("A", "text"), node_spec("B", "image")],
        &[],
        CreateOptions::default(),
    );
    assert_eq!(report.created, vec!["A".to_string(), "B".to_string()]);
    workspace
}

#[allow(dead_code)]
pub fn node_spec(id: &str, node_type: &str) -> NodeSpec {
    NodeSpec {
        id: Some(id.to_string()),
        node_type: node_type.to_string(),
        ..NodeSpec::default()
    }
}

#[allow(dead_code)]
pub fn edge_spec(source: &str, target: &str) -> EdgeSpec {
    EdgeSpec {
        source: source.to_string(),
        target: target.to_string(),
        source_handle: None,
        target_handle: None,
        data_type: None,
    }
}

/// A bare node without handle declarations, for validator-level tests.
#[allow(dead_code)]
pub fn bare_node(id: &str, node_type: &str) -> Node {
    Node::new(id, node_type)
}

/// A node carrying explicit instance-level handles.
#[allow(dead_code)]
pub fn node_with_handles(id: &str, node_type: &str, handles: Vec<Handle>) -> Node {
    let mut node = Node::new(id, node_type);
    node.handles = handles;
    node
}
