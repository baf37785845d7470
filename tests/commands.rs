//! Tests for the command surface: dispatch, error payloads and the implicit
//! snapshot-before-mutation contract.
mod common;
use common::*;
use kairo::prelude::*;
use serde_json::{Value, json};

fn error_code(payload: &Value) -> Option<&str> {
    payload.get("error")?.get("code")?.as_str()
}

#[test]
fn test_create_command_reports_applied_work() {
    let mut workspace = scenario_workspace();
    let response = workspace.dispatch(CommandRequest::new(
        "create",
        json!({
            "nodes": [ { "id": "C", "type": "text" } ],
            "edges": [ { "source": "C", "target": "B" } ]
        }),
    ));

    assert!(response.get("error").is_none());
    assert_eq!(response["created"], json!(["C"]));
    assert_eq!(response["idMap"]["C"], json!("C"));
    assert_eq!(response["edges"].as_array().map(Vec::len), Some(1));
    assert_eq!(workspace.document().nodes.len(), 3);
}

#[test]
fn test_malformed_json_returns_argument_error() {
    let mut workspace = scenario_workspace();
    let response = workspace.dispatch_json("{ not json");
    assert_eq!(error_code(&response), Some("ArgumentError"));
}

#[test]
fn test_unknown_command_returns_argument_error() {
    let mut workspace = scenario_workspace();
    let response = workspace.dispatch(CommandRequest::new("teleport", Value::Null));
    assert_eq!(error_code(&response), Some("ArgumentError"));
    let message = response["error"]["message"].as_str().unwrap_or_default();
    assert!(message.contains("teleport"));
}

#[test]
fn test_invalid_arguments_rejected_before_any_mutation() {
    let mut workspace = scenario_workspace();
    let nodes_before = workspace.document().nodes.len();
    let history_before = workspace.history().depth();

    let response = workspace.dispatch(CommandRequest::new(
        "create",
        json!({ "nodes": 42 }),
    ));

    assert_eq!(error_code(&response), Some("ArgumentError"));
    assert_eq!(workspace.document().nodes.len(), nodes_before);
    // Argument errors precede even the snapshot.
    assert_eq!(workspace.history().depth(), history_before);
}

#[test]
fn test_get_state_round_trips_document() {
    let mut workspace = scenario_workspace();
    let response = workspace.dispatch(CommandRequest::new("getState", Value::Null));

    let parsed: Document = serde_json::from_value(response).expect("state should parse back");
    assert_eq!(&parsed, workspace.document());
}

#[test]
fn test_get_node_found_and_missing() {
    let mut workspace = scenario_workspace();

    let response = workspace.dispatch(CommandRequest::new("getNode", json!({ "id": "A" })));
    assert_eq!(response["id"], json!("A"));
    assert_eq!(response["type"], json!("text"));

    let response = workspace.dispatch(CommandRequest::new("getNode", json!({ "id": "ghost" })));
    assert_eq!(error_code(&response), Some("NotFound"));
}

#[test]
fn test_update_node_command_failure_codes() {
    let mut workspace = scenario_workspace();

    let response = workspace.dispatch(CommandRequest::new(
        "updateNode",
        json!({ "id": "ghost", "label": "x" }),
    ));
    assert_eq!(error_code(&response), Some("NotFound"));

    let response =
        workspace.dispatch(CommandRequest::new("updateNode", json!({ "id": "A" })));
    assert_eq!(error_code(&response), Some("NoOp"));

    let response = workspace.dispatch(CommandRequest::new(
        "updateNode",
        json!({ "id": "A", "data": { "prompt": "dune" } }),
    ));
    assert!(response.get("error").is_none());
    assert_eq!(response["previousData"]["prompt"], json!(""));
}

#[test]
fn test_clear_command_requires_confirmation_flag() {
    let mut workspace = scenario_workspace();

    let refused = workspace.dispatch(CommandRequest::new("clear", Value::Null));
    assert_eq!(error_code(&refused), Some("ConfirmationRequired"));
    assert_eq!(workspace.document().nodes.len(), 2);

    let response = workspace.dispatch(CommandRequest::new("clear", json!({ "confirm": true })));
    assert_eq!(response["cleared"], json!(true));
    assert!(workspace.document().nodes.is_empty());
}

#[test]
fn test_every_mutating_command_is_undoable() {
    let mut workspace = scenario_workspace();

    workspace.dispatch(CommandRequest::new(
        "connect",
        json!({ "edges": [ { "source": "A", "target": "B" } ] }),
    ));
    assert_eq!(workspace.document().edges.len(), 1);

    let response = workspace.dispatch(CommandRequest::new("undo", Value::Null));
    assert_eq!(response["undone"], json!(true));
    assert!(workspace.document().edges.is_empty());

    let response = workspace.dispatch(CommandRequest::new("redo", Value::Null));
    assert_eq!(response["redone"], json!(true));
    assert_eq!(workspace.document().edges.len(), 1);
}

#[test]
fn test_undo_walks_back_through_commands() {
    let mut workspace = Workspace::new(Document::empty("doc"), NodeTypeRegistry::builtin());

    workspace.dispatch(CommandRequest::new(
        "create",
        json!({ "nodes": [ { "id": "t", "type": "text" } ] }),
    ));
    workspace.dispatch(CommandRequest::new(
        "create",
        json!({ "nodes": [ { "id": "i", "type": "image" } ] }),
    ));
    workspace.dispatch(CommandRequest::new(
        "connect",
        json!({ "edges": [ { "source": "t", "target": "i" } ] }),
    ));

    assert_eq!(workspace.document().nodes.len(), 2);
    assert_eq!(workspace.document().edges.len(), 1);

    workspace.dispatch(CommandRequest::new("undo", Value::Null));
    assert!(workspace.document().edges.is_empty());
    workspace.dispatch(CommandRequest::new("undo", Value::Null));
    assert_eq!(workspace.document().nodes.len(), 1);
    workspace.dispatch(CommandRequest::new("undo", Value::Null));
    assert!(workspace.document().nodes.is_empty());

    let response = workspace.dispatch(CommandRequest::new("undo", Value::Null));
    assert_eq!(response["undone"], json!(false));
}

#[test]
fn test_validate_command_is_read_only() {
    let mut workspace = scenario_workspace();
    workspace.dispatch(CommandRequest::new(
        "connect",
        json!({ "edges": [ { "source": "A", "target": "B" } ] }),
    ));
    let document_before = workspace.document().clone();
    let history_before = workspace.history().depth();

    let response = workspace.dispatch(CommandRequest::new("validate", Value::Null));

    assert_eq!(response["valid"], json!(true));
    assert_eq!(response["acceptedCount"], json!(1));
    assert_eq!(response["rejectedCount"], json!(0));
    assert_eq!(workspace.document(), &document_before);
    assert_eq!(workspace.history().depth(), history_before);
}

#[test]
fn test_validate_command_reports_stale_documents() {
    // A hand-loaded document with a dangling edge: validate surfaces it
    // without mutating anything.
    let mut document = Document::empty("stale");
    document.nodes.push(Node::new("A", "text"));
    document
        .edges
        .push(Edge::between("A", "text-out", "ghost", "prompt-in"));
    let mut workspace = Workspace::new(document, scenario_registry());

    let response = workspace.dispatch(CommandRequest::new("validate", Value::Null));
    assert_eq!(response["valid"], json!(false));
    assert_eq!(response["rejectedCount"], json!(1));
    let reasons = &response["rejected"][0]["reasons"];
    assert_eq!(reasons, &json!(["direction-mismatch"]));
    assert_eq!(workspace.document().edges.len(), 1);
}

#[test]
fn test_delete_commands_report_partial_success() {
    let mut workspace = scenario_workspace();
    workspace.dispatch(CommandRequest::new(
        "connect",
        json!({ "edges": [ { "source": "A", "target": "B" } ] }),
    ));

    let response = workspace.dispatch(CommandRequest::new(
        "deleteNodes",
        json!({ "ids": ["B", "ghost"] }),
    ));
    assert_eq!(response["deleted"], json!(["B"]));
    assert_eq!(response["missing"], json!(["ghost"]));
    assert_eq!(response["removedEdges"].as_array().map(Vec::len), Some(1));
    assert!(workspace.document().edges.is_empty());
}

#[test]
fn test_missing_arguments_default_where_allowed() {
    let mut workspace = Workspace::new(Document::empty("doc"), NodeTypeRegistry::builtin());
    // A create with no arguments at all is a valid empty batch.
    let response = workspace.dispatch(CommandRequest::new("create", Value::Null));
    assert!(response.get("error").is_none());
    assert_eq!(response["created"], json!([]));
}
