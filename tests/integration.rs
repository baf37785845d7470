//! Integration tests: full agent-style sessions over the command surface,
//! wire-shape round-trips and partial-success recovery.
mod common;
use common::*;
use kairo::prelude::*;
use serde_json::{Value, json};

#[test]
fn test_agent_builds_pipeline_end_to_end() {
    let mut workspace = Workspace::new(Document::empty("pipeline"), NodeTypeRegistry::builtin());

    let response = workspace.dispatch(CommandRequest::new(
        "create",
        json!({
            "nodes": [
                { "id": "script", "type": "text" },
                { "id": "frame", "type": "image" },
                { "id": "hires", "type": "upscale" }
            ],
            "edges": [
                { "source": "script", "target": "frame" },
                { "source": "frame", "target": "hires" }
            ]
        }),
    ));

    assert!(response.get("error").is_none());
    assert_eq!(response["created"].as_array().map(Vec::len), Some(3));
    assert_eq!(response["edges"].as_array().map(Vec::len), Some(2));

    // The text prompt feeds the image node's text input, not its image input.
    let document = workspace.document();
    let first = document
        .edge("script-text-out-frame-prompt-in")
        .expect("prompt edge");
    assert_eq!(first.target_handle, "prompt-in");
    // The image output chains into the upscaler.
    assert!(document.contains_edge("frame-image-out-hires-image-in"));
}

#[test]
fn test_partial_success_lets_caller_retry_rejected_subset() {
    let mut workspace = Workspace::new(Document::empty("pipeline"), NodeTypeRegistry::builtin());

    // One node type is bogus and one edge is kind-incompatible; the valid
    // remainder must land anyway.
    let response = workspace.dispatch(CommandRequest::new(
        "create",
        json!({
            "nodes": [
                { "id": "script", "type": "text" },
                { "id": "voice", "type": "audio" },
                { "id": "warp", "type": "teleport" }
            ],
            "edges": [
                { "source": "script", "target": "voice" },
                { "source": "voice", "target": "script" }
            ]
        }),
    ));

    assert_eq!(response["created"].as_array().map(Vec::len), Some(2));
    assert_eq!(response["skippedNodes"].as_array().map(Vec::len), Some(1));
    assert_eq!(response["edges"].as_array().map(Vec::len), Some(1));
    assert_eq!(response["skippedEdges"].as_array().map(Vec::len), Some(1));

    // The agent reads the reasons and retries only what failed, with a type
    // the registry does permit.
    let reason = response["skippedNodes"][0]["reason"]
        .as_str()
        .unwrap_or_default();
    assert!(reason.contains("teleport"));

    let retry = workspace.dispatch(CommandRequest::new(
        "create",
        json!({ "nodes": [ { "id": "warp", "type": "upscale" } ] }),
    ));
    assert_eq!(retry["created"], json!(["warp"]));
    assert_eq!(workspace.document().nodes.len(), 3);
}

#[test]
fn test_document_round_trips_wire_shape() {
    let mut workspace = Workspace::new(Document::empty("wire"), NodeTypeRegistry::builtin());
    workspace.dispatch(CommandRequest::new(
        "create",
        json!({
            "nodes": [
                { "id": "t", "type": "text", "label": "Prompt" },
                { "id": "i", "type": "image" }
            ],
            "edges": [ { "source": "t", "target": "i" } ]
        }),
    ));

    let serialized =
        serde_json::to_string_pretty(workspace.document()).expect("serialize document");

    // CamelCase field names on the wire, exactly as the editor persists them.
    assert!(serialized.contains("\"schemaVersion\""));
    assert!(serialized.contains("\"sourceHandle\""));
    assert!(serialized.contains("\"targetHandle\""));
    assert!(serialized.contains("\"executionOrder\""));
    assert!(serialized.contains("\"viewport\""));

    let parsed: Document = serde_json::from_str(&serialized).expect("parse document");
    assert_eq!(&parsed, workspace.document());
}

#[test]
fn test_wire_synonyms_accepted_on_input() {
    // A document produced by the editor uses camelCase and direction
    // synonyms; it must load without loss.
    let raw = json!({
        "id": "wf-1",
        "name": "Imported",
        "schemaVersion": 1,
        "nodes": [
            {
                "id": "n1",
                "type": "text",
                "position": { "x": 10.0, "y": 20.0 },
                "executionOrder": 1,
                "data": { "prompt": "hello" },
                "handles": [
                    { "id": "out", "direction": "source", "dataType": "text" }
                ]
            },
            { "id": "n2", "type": "image", "position": { "x": 0.0, "y": 0.0 } }
        ],
        "edges": [
            {
                "id": "n1-out-n2-prompt-in",
                "source": "n1",
                "sourceHandle": "out",
                "target": "n2",
                "targetHandle": "prompt-in",
                "isProcessing": false
            }
        ],
        "viewport": { "x": 0.0, "y": 0.0, "zoom": 1.5 }
    });

    let document: Document = serde_json::from_value(raw).expect("parse editor document");
    assert_eq!(document.nodes[0].handles[0].direction, HandleDirection::Output);
    assert_eq!(document.nodes[0].handles[0].kind, Some(DataKind::Text));
    assert!(document.is_structurally_consistent());

    // Loaded documents validate cleanly against the builtin registry.
    let registry = NodeTypeRegistry::builtin();
    let classification = EdgeValidator::new(&registry).classify_document(&document);
    assert!(classification.is_fully_valid());
}

#[test]
fn test_session_survives_undo_redo_cycles() {
    let mut workspace = scenario_workspace();

    workspace.dispatch(CommandRequest::new(
        "connect",
        json!({ "edges": [ { "source": "A", "target": "B" } ] }),
    ));
    workspace.dispatch(CommandRequest::new(
        "updateNode",
        json!({ "id": "A", "data": { "prompt": "v1" } }),
    ));
    workspace.dispatch(CommandRequest::new(
        "updateNode",
        json!({ "id": "A", "data": { "prompt": "v2" } }),
    ));
    let final_document = workspace.document().clone();

    for _ in 0..3 {
        workspace.dispatch(CommandRequest::new("undo", Value::Null));
    }
    assert!(workspace.document().edges.is_empty());
    assert_eq!(
        workspace.document().node("A").expect("node").data.get("prompt"),
        Some(&json!(""))
    );

    for _ in 0..3 {
        workspace.dispatch(CommandRequest::new("redo", Value::Null));
    }
    assert_eq!(workspace.document(), &final_document);
}

#[test]
fn test_replace_create_via_command_surface() {
    let mut workspace = Workspace::new(Document::empty("doc"), NodeTypeRegistry::builtin());
    let specs: Vec<Value> = (0..10)
        .map(|i| json!({ "id": format!("n{i}"), "type": "text" }))
        .collect();
    workspace.dispatch(CommandRequest::new("create", json!({ "nodes": specs })));
    assert_eq!(workspace.document().nodes.len(), 10);

    let response = workspace.dispatch(CommandRequest::new(
        "create",
        json!({
            "nodes": [ { "id": "n1", "type": "text" } ],
            "options": { "replace": true }
        }),
    ));

    assert_eq!(response["created"], json!(["n1"]));
    let document = workspace.document();
    assert_eq!(document.nodes.len(), 1);
    assert_eq!(document.nodes[0].id, "n1");
    assert!(document.edges.is_empty());

    // And the replacement itself is one undo step.
    workspace.dispatch(CommandRequest::new("undo", Value::Null));
    assert_eq!(workspace.document().nodes.len(), 10);
}
