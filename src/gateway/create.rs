use crate::gateway::report::{CreateReport, SkippedNode};
use crate::gateway::{CreateOptions, EdgeSpec, Gateway, NodeSpec};
use crate::graph::{Node, Position};

// Deterministic grid for specs without a position: origin plus index-scaled
// offsets, wrapping to a new row every LAYOUT_ROW nodes.
const LAYOUT_ORIGIN_X: f64 = 80.0;
const LAYOUT_ORIGIN_Y: f64 = 80.0;
const LAYOUT_X_STEP: f64 = 320.0;
const LAYOUT_Y_STEP: f64 = 220.0;
const LAYOUT_ROW: usize = 3;

fn grid_position(index: usize) -> Position {
    let column = index % LAYOUT_ROW;
    let row = index / LAYOUT_ROW;
    Position {
        x: LAYOUT_ORIGIN_X + column as f64 * LAYOUT_X_STEP,
        y: LAYOUT_ORIGIN_Y + row as f64 * LAYOUT_Y_STEP,
    }
}

impl Gateway {
    /// Bulk node creation with optional connections.
    ///
    /// Ids are made collision-free by suffixing `-1`, `-2`, … and the rename
    /// is recorded in the report's id map. Edge specs are resolved against
    /// the final id map, so a caller may keep referencing its requested ids
    /// even after a rename. With `options.replace` the existing document and
    /// its persisted mirror are discarded first.
    pub fn create_nodes(
        &mut self,
        specs: &[NodeSpec],
        edge_specs: &[EdgeSpec],
        options: CreateOptions,
    ) -> CreateReport {
        let mut report = CreateReport::default();

        if options.replace {
            self.document_mut().nodes.clear();
            self.document_mut().edges.clear();
            self.clear_mirror();
            log::info!("replaced document '{}'", self.document().name);
        }

        let previous_max_order = self
            .document()
            .nodes
            .iter()
            .map(|n| n.execution_order)
            .max()
            .unwrap_or(0);
        let layout_base = self.document().nodes.len();
        let mut auto_placed = 0usize;
        let mut created_in_batch = 0u32;

        for (batch_index, spec) in specs.iter().enumerate() {
            if !self.registry().contains(&spec.node_type) {
                report.skipped_nodes.push(SkippedNode {
                    requested_id: spec.id.clone(),
                    node_type: spec.node_type.clone(),
                    reason: format!(
                        "node type '{}' is not permitted in this context",
                        spec.node_type
                    ),
                });
                continue;
            }

            let requested = spec
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-{}", spec.node_type, layout_base + batch_index + 1));
            let final_id = self.unique_node_id(&requested);

            let position = match spec.position {
                Some(position) => position,
                None => {
                    let position = grid_position(layout_base + auto_placed);
                    auto_placed += 1;
                    position
                }
            };

            created_in_batch += 1;
            let execution_order = spec
                .execution_order
                .unwrap_or(previous_max_order + created_in_batch);

            let mut data = self.registry().initial_data(&spec.node_type);
            if let Some(patch) = &spec.data {
                for (key, value) in patch {
                    data.insert(key.clone(), value.clone());
                }
            }

            let node = Node {
                id: final_id.clone(),
                node_type: spec.node_type.clone(),
                position,
                label: spec.label.clone(),
                execution_order,
                data,
                handles: spec.handles.clone().unwrap_or_default(),
            };

            report.id_map.insert(requested, final_id.clone());
            report.created.push(final_id.clone());
            self.document_mut().nodes.push(node);
        }

        // Edge specs may reference the caller's requested ids; remap them
        // through the final id map before resolution.
        let remapped: Vec<EdgeSpec> = edge_specs
            .iter()
            .map(|spec| {
                let mut spec = spec.clone();
                if let Some(final_id) = report.id_map.get(&spec.source) {
                    spec.source = final_id.clone();
                }
                if let Some(final_id) = report.id_map.get(&spec.target) {
                    spec.target = final_id.clone();
                }
                spec
            })
            .collect();
        let connected = self.resolve_and_insert(&remapped);
        report.edges = connected.edges;
        report.skipped_edges = connected.skipped;

        log::debug!(
            "created {} node(s) and {} edge(s), skipped {} node(s) and {} edge(s)",
            report.created.len(),
            report.edges.len(),
            report.skipped_nodes.len(),
            report.skipped_edges.len()
        );
        if options.replace || !report.created.is_empty() || !report.edges.is_empty() {
            self.notify();
        }
        report
    }

    /// Resolves the requested id against the current node set, suffixing
    /// `-1`, `-2`, … until free. Nodes created earlier in the same batch are
    /// already in the document, so intra-batch collisions resolve too.
    fn unique_node_id(&self, requested: &str) -> String {
        if !self.document().contains_node(requested) {
            return requested.to_string();
        }
        let mut suffix = 1usize;
        loop {
            let candidate = format!("{}-{}", requested, suffix);
            if !self.document().contains_node(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
