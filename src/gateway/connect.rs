use itertools::Itertools;

use crate::gateway::report::{ConnectReport, SkippedEdge};
use crate::gateway::{EdgeSpec, Gateway};
use crate::graph::{DataKind, Edge, HandleDirection, Node};
use crate::validate::{EdgeRole, EdgeValidator, HandleResolver};

impl Gateway {
    /// Resolves and validates the edge specs against the current document and
    /// inserts the accepted ones. No node creation happens here.
    pub fn connect(&mut self, edge_specs: &[EdgeSpec]) -> ConnectReport {
        let report = self.resolve_and_insert(edge_specs);
        if !report.edges.is_empty() {
            log::debug!(
                "connected {} edge(s), skipped {}",
                report.edges.len(),
                report.skipped.len()
            );
            self.notify();
        }
        report
    }

    /// Shared edge path for `connect` and `create_nodes`: resolve handles,
    /// classify, insert what survives. Specs that cannot even be resolved
    /// (missing endpoint node, no handle of the required direction) are
    /// skipped with a descriptive reason instead of reaching validation.
    pub(super) fn resolve_and_insert(&mut self, specs: &[EdgeSpec]) -> ConnectReport {
        let mut report = ConnectReport::default();

        let mut candidates = Vec::new();
        for spec in specs {
            match self.resolve_edge(spec) {
                Ok(edge) => candidates.push(edge),
                Err(reason) => report.skipped.push(SkippedEdge {
                    source: spec.source.clone(),
                    target: spec.target.clone(),
                    reason,
                }),
            }
        }

        let validator = EdgeValidator::new(&self.registry);
        let classification = validator.classify(&candidates, &self.document().nodes);

        for rejection in classification.rejected {
            report.skipped.push(SkippedEdge {
                source: rejection.edge.source.clone(),
                target: rejection.edge.target.clone(),
                reason: format!("{}: {}", rejection.summary(), rejection.detail),
            });
        }
        for edge in classification.accepted {
            // Content-addressed identity makes this idempotent: an edge that
            // already exists is reported accepted but never duplicated.
            if !self.document().contains_edge(&edge.id) {
                self.document_mut().edges.push(edge.clone());
            }
            report.edges.push(edge);
        }
        report
    }

    fn resolve_edge(&self, spec: &EdgeSpec) -> Result<Edge, String> {
        let resolver = HandleResolver::new(&self.registry);

        let source = self
            .document()
            .node(&spec.source)
            .ok_or_else(|| format!("source node '{}' does not exist", spec.source))?;
        let target = self
            .document()
            .node(&spec.target)
            .ok_or_else(|| format!("target node '{}' does not exist", spec.target))?;

        // When one side is pinned explicitly, its kind steers the other
        // side's auto-resolution.
        let explicit_target_kind = spec
            .target_handle
            .as_ref()
            .map(|id| resolver.resolve(target, id, EdgeRole::Target).kind);

        let source_handle = match &spec.source_handle {
            Some(id) => id.clone(),
            None => self
                .pick_handle(
                    &resolver,
                    source,
                    HandleDirection::Output,
                    spec.data_type,
                    explicit_target_kind,
                )
                .ok_or_else(|| {
                    format!("direction-mismatch: node '{}' has no output handle", source.id)
                })?,
        };

        let source_kind = resolver
            .resolve(source, &source_handle, EdgeRole::Source)
            .kind;

        let target_handle = match &spec.target_handle {
            Some(id) => id.clone(),
            None => self
                .pick_handle(
                    &resolver,
                    target,
                    HandleDirection::Input,
                    spec.data_type,
                    Some(source_kind),
                )
                .ok_or_else(|| {
                    format!("direction-mismatch: node '{}' has no input handle", target.id)
                })?,
        };

        Ok(Edge::between(
            &spec.source,
            &source_handle,
            &spec.target,
            &target_handle,
        ))
    }

    /// Preference chain for an omitted handle: a handle whose kind matches
    /// the explicit `dataType` hint, then one compatible with the other
    /// endpoint's kind, then the first handle of the required direction.
    fn pick_handle<'s>(
        &'s self,
        resolver: &HandleResolver<'s>,
        node: &'s Node,
        direction: HandleDirection,
        hint: Option<DataKind>,
        other_kind: Option<DataKind>,
    ) -> Option<String> {
        let of_direction = resolver
            .declared_handles(node)
            .iter()
            .filter(|h| h.direction == direction)
            .collect_vec();
        if of_direction.is_empty() {
            return None;
        }

        if let Some(hint) = hint {
            if let Some(handle) = of_direction
                .iter()
                .find(|h| h.kind.unwrap_or(DataKind::Any) == hint)
            {
                return Some(handle.id.clone());
            }
        }
        if let Some(other) = other_kind {
            if let Some(handle) = of_direction
                .iter()
                .find(|h| DataKind::compatible(h.kind.unwrap_or(DataKind::Any), other))
            {
                return Some(handle.id.clone());
            }
        }
        Some(of_direction[0].id.clone())
    }
}
