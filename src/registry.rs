//! Node type registry: the host-supplied catalogue of node kinds.
//!
//! The registry is an explicit, constructed value passed into the gateway and
//! the edge validator, never ambient process state, so tests can run against
//! a fake catalogue.

use crate::graph::{DataKind, Handle};
use ahash::AHashMap;
use serde_json::{Value, json};

/// Everything the engine needs to know about one node type: the default
/// handle declaration and the template for a fresh node's data map.
#[derive(Debug, Clone)]
pub struct NodeTypeSpec {
    pub type_name: String,
    pub default_handles: Vec<Handle>,
    pub initial_data: Value,
}

impl NodeTypeSpec {
    pub fn new(type_name: &str, default_handles: Vec<Handle>, initial_data: Value) -> NodeTypeSpec {
        NodeTypeSpec {
            type_name: type_name.to_string(),
            default_handles,
            initial_data,
        }
    }
}

/// Maps node type names to their specs.
#[derive(Debug, Clone, Default)]
pub struct NodeTypeRegistry {
    types: AHashMap<String, NodeTypeSpec>,
}

impl NodeTypeRegistry {
    pub fn new() -> NodeTypeRegistry {
        NodeTypeRegistry {
            types: AHashMap::new(),
        }
    }

    /// The generation node set of the desktop editor.
    pub fn builtin() -> NodeTypeRegistry {
        let mut registry = NodeTypeRegistry::new();
        registry.register(NodeTypeSpec::new(
            "text",
            vec![
                Handle::input("text-in", DataKind::Text),
                Handle::output("text-out", DataKind::Text),
            ],
            json!({ "prompt": "", "model": null, "output": null }),
        ));
        registry.register(NodeTypeSpec::new(
            "image",
            vec![
                Handle::input("prompt-in", DataKind::Text),
                Handle::input("image-in", DataKind::Image),
                Handle::output("image-out", DataKind::Image),
            ],
            json!({ "prompt": "", "model": null, "output": null }),
        ));
        registry.register(NodeTypeSpec::new(
            "video",
            vec![
                Handle::input("prompt-in", DataKind::Text),
                Handle::input("image-in", DataKind::Image),
                Handle::output("video-out", DataKind::Video),
            ],
            json!({ "prompt": "", "model": null, "output": null }),
        ));
        registry.register(NodeTypeSpec::new(
            "audio",
            vec![
                Handle::input("prompt-in", DataKind::Text),
                Handle::output("audio-out", DataKind::Audio),
            ],
            json!({ "prompt": "", "model": null, "output": null }),
        ));
        registry.register(NodeTypeSpec::new(
            "upscale",
            vec![
                Handle::input("image-in", DataKind::Image),
                Handle::output("image-out", DataKind::Image),
            ],
            json!({ "model": null, "scale": 2, "output": null }),
        ));
        registry.register(NodeTypeSpec::new(
            "model",
            vec![Handle::output("model-out", DataKind::Model)],
            json!({ "model": null }),
        ));
        registry
    }

    pub fn register(&mut self, spec: NodeTypeSpec) {
        self.types.insert(spec.type_name.clone(), spec);
    }

    /// Builder-style registration for fluent construction in tests and hosts.
    pub fn with_type(mut self, spec: NodeTypeSpec) -> NodeTypeRegistry {
        self.register(spec);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn spec(&self, type_name: &str) -> Option<&NodeTypeSpec> {
        self.types.get(type_name)
    }

    /// Default handle declaration for a type; empty for unknown types.
    pub fn default_handles(&self, type_name: &str) -> &[Handle] {
        self.types
            .get(type_name)
            .map(|spec| spec.default_handles.as_slice())
            .unwrap_or(&[])
    }

    /// Clones the data-map template for a fresh node of this type.
    pub fn initial_data(&self, type_name: &str) -> AHashMap<String, Value> {
        match self.types.get(type_name).map(|spec| &spec.initial_data) {
            Some(Value::Object(template)) => template
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            _ => AHashMap::new(),
        }
    }

    /// Registered type names, sorted for stable reporting.
    pub fn type_names(&self) -> Vec<&str> {
        use itertools::Itertools;
        self.types.keys().map(String::as_str).sorted().collect()
    }
}
