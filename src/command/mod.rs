//! Command surface: the externally-reachable API shared by UI actions and
//! automated agents.
//!
//! Dispatch is thin on purpose: one command resolves to one gateway call.
//! Argument problems come back as error payloads rather than panics, so a
//! caller that sent malformed JSON can recover and retry. Every mutating
//! command takes an immediate snapshot first, making each externally-visible
//! mutation individually undoable.

mod args;

pub use args::{
    ClearArgs, ConnectArgs, CreateArgs, DeleteEdgesArgs, DeleteNodesArgs, GetNodeArgs,
    UpdateNodeArgs,
};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::{CommandError, GatewayError, HistoryError};
use crate::gateway::Gateway;
use crate::graph::Document;
use crate::history::History;
use crate::registry::NodeTypeRegistry;
use crate::validate::EdgeValidator;

/// One structured request, as received from the UI or an agent.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub arguments: Value,
}

impl CommandRequest {
    pub fn new(command: &str, arguments: Value) -> CommandRequest {
        CommandRequest {
            command: command.to_string(),
            arguments,
        }
    }
}

/// A live editing session: the mutation gateway plus its history engine.
///
/// Single-threaded by contract; a host with concurrent callers must
/// serialize access before invoking anything here.
pub struct Workspace {
    gateway: Gateway,
    history: History,
}

impl Workspace {
    pub fn new(document: Document, registry: NodeTypeRegistry) -> Workspace {
        Workspace {
            gateway: Gateway::new(document, registry),
            history: History::default(),
        }
    }

    /// Couples a pre-built gateway (e.g. one with a persistence mirror) with
    /// a custom-bounded history.
    pub fn with_parts(gateway: Gateway, history: History) -> Workspace {
        Workspace { gateway, history }
    }

    pub fn document(&self) -> &Document {
        self.gateway.document()
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut Gateway {
        &mut self.gateway
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Captures the current state, debounced unless `immediate`. Hosts call
    /// this around gestures (drags) that should collapse into one entry.
    pub fn take_snapshot(&mut self, immediate: bool) -> Result<bool, HistoryError> {
        self.history.take_snapshot(self.gateway.document(), immediate)
    }

    /// Commits a due debounced capture, if any. Hosts pump this from their
    /// idle loop.
    pub fn poll_history(&mut self) -> Result<bool, HistoryError> {
        self.history.poll()
    }

    pub fn undo(&mut self) -> Result<bool, HistoryError> {
        let undone = self.history.undo(self.gateway.document_mut())?;
        if undone {
            self.gateway.notify();
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, HistoryError> {
        let redone = self.history.redo(self.gateway.document_mut())?;
        if redone {
            self.gateway.notify();
        }
        Ok(redone)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Parses a raw JSON request and dispatches it. Malformed JSON comes
    /// back as an error payload, never a panic.
    pub fn dispatch_json(&mut self, raw: &str) -> Value {
        match serde_json::from_str::<CommandRequest>(raw) {
            Ok(request) => self.dispatch(request),
            Err(err) => error_payload(&CommandError::MalformedRequest(err.to_string())),
        }
    }

    /// Resolves a request to one gateway call and returns its payload. The
    /// payload always carries an `error` field when the command could not
    /// complete.
    pub fn dispatch(&mut self, request: CommandRequest) -> Value {
        match self.run(&request) {
            Ok(payload) => payload,
            Err(err) => error_payload(&err),
        }
    }

    fn run(&mut self, request: &CommandRequest) -> Result<Value, CommandError> {
        match request.command.as_str() {
            "create" => {
                let args: CreateArgs = parse_args("create", &request.arguments)?;
                self.snapshot_before_mutation()?;
                let report = self.gateway.create_nodes(&args.nodes, &args.edges, args.options);
                to_payload(&report)
            }
            "connect" => {
                let args: ConnectArgs = parse_args("connect", &request.arguments)?;
                self.snapshot_before_mutation()?;
                let report = self.gateway.connect(&args.edges);
                to_payload(&report)
            }
            "validate" => {
                let validator = EdgeValidator::new(self.gateway.registry());
                let classification = validator.classify_document(self.gateway.document());
                Ok(json!({
                    "valid": classification.is_fully_valid(),
                    "acceptedCount": classification.accepted.len(),
                    "rejectedCount": classification.rejected.len(),
                    "rejected": to_payload(&classification.rejected)?,
                }))
            }
            "getState" => to_payload(self.gateway.document()),
            "getNode" => {
                let args: GetNodeArgs = parse_args("getNode", &request.arguments)?;
                let node = self.gateway.document().node(&args.id).ok_or_else(|| {
                    GatewayError::NodeNotFound {
                        node_id: args.id.clone(),
                    }
                })?;
                to_payload(node)
            }
            "updateNode" => {
                let args: UpdateNodeArgs = parse_args("updateNode", &request.arguments)?;
                // Pre-flight the failure modes so a rejected update leaves no
                // stray history entry behind.
                if args.data.is_none() && args.label.is_none() {
                    return Err(GatewayError::EmptyUpdate { node_id: args.id }.into());
                }
                if !self.gateway.document().contains_node(&args.id) {
                    return Err(GatewayError::NodeNotFound { node_id: args.id }.into());
                }
                self.snapshot_before_mutation()?;
                let report = self.gateway.update_node(
                    &args.id,
                    args.data.as_ref(),
                    args.label.as_deref(),
                )?;
                to_payload(&report)
            }
            "deleteNodes" => {
                let args: DeleteNodesArgs = parse_args("deleteNodes", &request.arguments)?;
                self.snapshot_before_mutation()?;
                let report = self.gateway.delete_nodes(&args.ids);
                to_payload(&report)
            }
            "deleteEdges" => {
                let args: DeleteEdgesArgs = parse_args("deleteEdges", &request.arguments)?;
                self.snapshot_before_mutation()?;
                let report = self.gateway.delete_edges(&args.edges);
                to_payload(&report)
            }
            "clear" => {
                let args: ClearArgs = parse_args("clear", &request.arguments)?;
                // The confirmation gate comes before the snapshot: a refused
                // clear must have zero side effects.
                if !args.confirm {
                    return Err(GatewayError::ConfirmationRequired { operation: "clear" }.into());
                }
                self.snapshot_before_mutation()?;
                self.gateway.clear(true)?;
                Ok(json!({ "cleared": true }))
            }
            "undo" => {
                let undone = self.undo()?;
                Ok(json!({ "undone": undone }))
            }
            "redo" => {
                let redone = self.redo()?;
                Ok(json!({ "redone": redone }))
            }
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    fn snapshot_before_mutation(&mut self) -> Result<(), CommandError> {
        self.history
            .take_snapshot(self.gateway.document(), true)?;
        Ok(())
    }
}

fn parse_args<T: DeserializeOwned>(command: &str, arguments: &Value) -> Result<T, CommandError> {
    // Absent arguments mean "all defaults" for commands that allow it.
    let value = if arguments.is_null() {
        json!({})
    } else {
        arguments.clone()
    };
    serde_json::from_value(value).map_err(|err| CommandError::InvalidArguments {
        command: command.to_string(),
        message: err.to_string(),
    })
}

fn to_payload<T: serde::Serialize>(value: &T) -> Result<Value, CommandError> {
    serde_json::to_value(value).map_err(|err| CommandError::ResponseEncoding(err.to_string()))
}

fn error_payload(err: &CommandError) -> Value {
    json!({
        "error": {
            "code": err.code(),
            "message": err.to_string(),
        }
    })
}
