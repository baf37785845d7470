use thiserror::Error;

/// Errors surfaced by mutation gateway operations.
///
/// Every variant is recoverable and carries enough context for the caller to
/// self-correct; none of them leaves the document half-mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Node '{node_id}' not found")]
    NodeNotFound { node_id: String },

    #[error("Update for node '{node_id}' carries neither a data patch nor a label")]
    EmptyUpdate { node_id: String },

    #[error("Operation '{operation}' is destructive and requires the explicit confirmation flag")]
    ConfirmationRequired { operation: &'static str },
}

/// Errors that can occur while encoding or restoring history snapshots.
#[derive(Error, Debug, Clone)]
pub enum HistoryError {
    #[error("Snapshot encoding failed: {0}")]
    Encode(String),

    #[error("Snapshot decoding failed: {0}")]
    Decode(String),
}

/// Errors produced by the command surface before or while dispatching.
///
/// Argument problems are reported before any mutation occurs, so a caller
/// (including an agent retrying from the error payload) never has to roll
/// anything back.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Malformed command request: {0}")]
    MalformedRequest(String),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Invalid arguments for '{command}': {message}")]
    InvalidArguments { command: String, message: String },

    #[error("Failed to encode response: {0}")]
    ResponseEncoding(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl CommandError {
    /// Stable machine-readable code grouping errors into the caller-facing
    /// taxonomy.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::MalformedRequest(_)
            | CommandError::UnknownCommand(_)
            | CommandError::InvalidArguments { .. } => "ArgumentError",
            CommandError::ResponseEncoding(_) | CommandError::History(_) => "Internal",
            CommandError::Gateway(GatewayError::NodeNotFound { .. }) => "NotFound",
            CommandError::Gateway(GatewayError::EmptyUpdate { .. }) => "NoOp",
            CommandError::Gateway(GatewayError::ConfirmationRequired { .. }) => {
                "ConfirmationRequired"
            }
        }
    }
}
