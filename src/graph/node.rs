use crate::graph::kind::DataKind;
use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which way data flows through a handle.
///
/// The wire format accepts the editor's `source`/`target` spellings as
/// synonyms for `output`/`input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleDirection {
    Input,
    Output,
}

impl Serialize for HandleDirection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            HandleDirection::Input => "input",
            HandleDirection::Output => "output",
        })
    }
}

impl<'de> Deserialize<'de> for HandleDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "input" | "target" => Ok(HandleDirection::Input),
            "output" | "source" => Ok(HandleDirection::Output),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["input", "output", "target", "source"],
            )),
        }
    }
}

/// A typed, directional port on a node.
///
/// The kind tag is optional on the wire; resolution falls back to the node
/// type's default declaration when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    pub id: String,
    pub direction: HandleDirection,
    #[serde(default, alias = "dataType", skip_serializing_if = "Option::is_none")]
    pub kind: Option<DataKind>,
}

impl Handle {
    pub fn input(id: &str, kind: DataKind) -> Handle {
        Handle {
            id: id.to_string(),
            direction: HandleDirection::Input,
            kind: Some(kind),
        }
    }

    pub fn output(id: &str, kind: DataKind) -> Handle {
        Handle {
            id: id.to_string(),
            direction: HandleDirection::Output,
            kind: Some(kind),
        }
    }
}

/// A canvas coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }
}

/// One pipeline step on the canvas.
///
/// `data` is opaque to the engine: it holds kind-specific configuration and
/// the last computed output, owned by the execution layer. `handles` is the
/// instance-level port declaration; when empty, the node type's default
/// declaration from the registry applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "executionOrder")]
    pub execution_order: u32,
    #[serde(default)]
    pub data: AHashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub handles: Vec<Handle>,
}

impl Node {
    pub fn new(id: &str, node_type: &str) -> Node {
        Node {
            id: id.to_string(),
            node_type: node_type.to_string(),
            position: Position::default(),
            label: None,
            execution_order: 0,
            data: AHashMap::new(),
            handles: Vec::new(),
        }
    }

    /// Looks up an instance-level handle declaration.
    pub fn instance_handle(&self, handle_id: &str) -> Option<&Handle> {
        self.handles.iter().find(|h| h.id == handle_id)
    }
}
