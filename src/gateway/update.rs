use ahash::{AHashMap, AHashSet};

use crate::error::GatewayError;
use crate::gateway::report::{DeleteEdgesReport, DeleteNodesReport, UpdateReport};
use crate::gateway::{EdgeMatcher, Gateway};

impl Gateway {
    /// Shallow-merges `data_patch` into the node's data map and/or replaces
    /// its label. The report carries the previous value of every overwritten
    /// key for inspection; rollback stays the history engine's job.
    pub fn update_node(
        &mut self,
        id: &str,
        data_patch: Option<&AHashMap<String, serde_json::Value>>,
        label_patch: Option<&str>,
    ) -> Result<UpdateReport, GatewayError> {
        if data_patch.is_none() && label_patch.is_none() {
            return Err(GatewayError::EmptyUpdate {
                node_id: id.to_string(),
            });
        }
        let node = self
            .document_mut()
            .node_mut(id)
            .ok_or_else(|| GatewayError::NodeNotFound {
                node_id: id.to_string(),
            })?;

        let mut previous_data = AHashMap::new();
        if let Some(patch) = data_patch {
            for (key, value) in patch {
                if let Some(old) = node.data.insert(key.clone(), value.clone()) {
                    previous_data.insert(key.clone(), old);
                }
            }
        }

        let label_replaced = label_patch.is_some();
        let previous_label = match label_patch {
            Some(label) => node.label.replace(label.to_string()),
            None => None,
        };

        self.notify();
        Ok(UpdateReport {
            node_id: id.to_string(),
            previous_data,
            label_replaced,
            previous_label,
        })
    }

    /// Removes the named nodes and cascades every edge touching any of them.
    /// Unknown ids are reported, not fatal; the rest of the batch proceeds.
    pub fn delete_nodes(&mut self, ids: &[String]) -> DeleteNodesReport {
        let mut report = DeleteNodesReport::default();

        let mut doomed: AHashSet<String> = AHashSet::with_capacity(ids.len());
        for id in ids {
            if self.document().contains_node(id) {
                doomed.insert(id.clone());
            } else {
                report.missing.push(id.clone());
            }
        }
        if doomed.is_empty() {
            return report;
        }

        let (removed_nodes, removed_edges) = self.document_mut().remove_nodes(&doomed);
        report.deleted = removed_nodes.into_iter().map(|n| n.id).collect();
        report.removed_edges = removed_edges.into_iter().map(|e| e.id).collect();

        log::debug!(
            "deleted {} node(s), cascaded {} edge(s)",
            report.deleted.len(),
            report.removed_edges.len()
        );
        self.notify();
        report
    }

    /// Deletes every edge selected by at least one matcher.
    pub fn delete_edges(&mut self, matchers: &[EdgeMatcher]) -> DeleteEdgesReport {
        let unmatched = matchers
            .iter()
            .filter(|m| !self.document().edges.iter().any(|e| m.matches(e)))
            .count();

        let mut deleted = Vec::new();
        self.document_mut().edges.retain(|edge| {
            let doomed = matchers.iter().any(|m| m.matches(edge));
            if doomed {
                deleted.push(edge.id.clone());
            }
            !doomed
        });

        let report = DeleteEdgesReport { deleted, unmatched };
        if !report.deleted.is_empty() {
            log::debug!("deleted {} edge(s)", report.deleted.len());
            self.notify();
        }
        report
    }
}
