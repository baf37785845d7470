//! History engine: bounded undo/redo over immutable snapshots.
//!
//! The engine keeps two stacks of compact snapshots (`past`, `future`) next
//! to the live document. Snapshots capture only the undoable portion of the
//! document (nodes and edges) and never alias mutable state; restoring one
//! reproduces the captured state exactly, including handle lists and data
//! maps.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::error::HistoryError;
use crate::graph::{Document, GraphState};

/// Default bound on the undo stack.
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Default debounce window for non-immediate captures.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// An immutable, compactly encoded capture of a document's graph state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    bytes: Vec<u8>,
}

impl Snapshot {
    // Compact serialized bytes rather than a structural clone: node data maps
    // hold arbitrary JSON, and the serialized form detaches the capture from
    // every live allocation.
    pub fn capture(state: &GraphState) -> Result<Snapshot, HistoryError> {
        let bytes =
            serde_json::to_vec(state).map_err(|err| HistoryError::Encode(err.to_string()))?;
        Ok(Snapshot { bytes })
    }

    pub fn restore(&self) -> Result<GraphState, HistoryError> {
        serde_json::from_slice(&self.bytes).map_err(|err| HistoryError::Decode(err.to_string()))
    }

    /// Encoded size in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

struct PendingSnapshot {
    state: GraphState,
    due: Instant,
}

/// The undo/redo state machine.
///
/// Cooperative: nothing here blocks or spawns. A non-immediate
/// capture sits in `pending` until the host pumps [`History::poll`] (or it
/// is flushed by an undo), so a burst of rapid edits collapses into a single
/// entry.
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    max_depth: usize,
    debounce: Duration,
    pending: Option<PendingSnapshot>,
}

impl History {
    pub fn new(max_depth: usize) -> History {
        History {
            past: VecDeque::new(),
            future: Vec::new(),
            max_depth: max_depth.max(1),
            debounce: DEFAULT_DEBOUNCE,
            pending: None,
        }
    }

    pub fn with_debounce(mut self, window: Duration) -> History {
        self.debounce = window;
        self
    }

    /// Number of committed undoable entries.
    pub fn depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redoable entries.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Captures the document's graph state.
    ///
    /// Immediate captures commit now (superseding any pending debounced
    /// capture, so only the latest wins). Non-immediate captures are
    /// scheduled behind the debounce window. Returns whether an entry was
    /// committed; a capture structurally identical to the top of `past` is
    /// suppressed.
    pub fn take_snapshot(
        &mut self,
        document: &Document,
        immediate: bool,
    ) -> Result<bool, HistoryError> {
        let state = document.graph_state();
        if immediate {
            self.pending = None;
            self.commit(state)
        } else {
            self.pending = Some(PendingSnapshot {
                state,
                due: Instant::now() + self.debounce,
            });
            Ok(false)
        }
    }

    /// Commits the pending capture if its debounce window has elapsed.
    pub fn poll(&mut self) -> Result<bool, HistoryError> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| Instant::now() >= pending.due);
        if due { self.flush() } else { Ok(false) }
    }

    /// Commits the pending capture now, regardless of the window.
    pub fn flush(&mut self) -> Result<bool, HistoryError> {
        match self.pending.take() {
            Some(pending) => self.commit(pending.state),
            None => Ok(false),
        }
    }

    fn commit(&mut self, state: GraphState) -> Result<bool, HistoryError> {
        if let Some(top) = self.past.back() {
            if top.restore()? == state {
                log::debug!("snapshot suppressed: no structural change");
                return Ok(false);
            }
        }
        self.past.push_back(Snapshot::capture(&state)?);
        if self.past.len() > self.max_depth {
            self.past.pop_front();
            log::debug!("evicted oldest history entry");
        }
        // A committed forward change invalidates the redo branch.
        self.future.clear();
        Ok(true)
    }

    /// Rolls the document back one entry. Returns `false` when `past` is
    /// empty. A pending debounced capture is flushed first so burst edits
    /// stay undoable.
    pub fn undo(&mut self, document: &mut Document) -> Result<bool, HistoryError> {
        self.flush()?;
        let Some(top) = self.past.back() else {
            return Ok(false);
        };
        // Decode before touching any stack so a failure leaves everything
        // untouched.
        let restored = top.restore()?;
        let displaced = Snapshot::capture(&document.graph_state())?;
        self.past.pop_back();
        self.future.push(displaced);
        document.restore_state(restored);
        Ok(true)
    }

    /// Rolls the document forward one entry. Returns `false` when `future`
    /// is empty.
    pub fn redo(&mut self, document: &mut Document) -> Result<bool, HistoryError> {
        let Some(top) = self.future.last() else {
            return Ok(false);
        };
        let restored = top.restore()?;
        let displaced = Snapshot::capture(&document.graph_state())?;
        self.future.pop();
        self.past.push_back(displaced);
        if self.past.len() > self.max_depth {
            self.past.pop_front();
        }
        document.restore_state(restored);
        Ok(true)
    }

    /// Empties both stacks without touching the live document.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.pending = None;
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_MAX_DEPTH)
    }
}
