//! # Undo/Redo History
//!
//! Linear history of whole-document snapshots.
//!
//! ## Design
//!
//! - The history is never empty; it starts with the loaded document at index 0
//! - Pushing truncates every snapshot after the current index, then appends
//! - Undo/redo only move the index; snapshots are never rewritten
//! - An optional level limit drops the oldest snapshots first
//!
//! ```text
//! push D1, push D2      [D0, D1, D2]  index 2
//! back, back            [D0, D1, D2]  index 0
//! push D3               [D0, D3]      index 1
//! ```

use stencil_tree::Document;
use tracing::trace;

/// Snapshot history for one editing session
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Document>,

    current_index: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    /// Unlimited history starting at `initial`
    pub fn new(initial: Document) -> Self {
        Self::with_max_levels(initial, 0)
    }

    /// History keeping at most `max_levels` undo steps
    pub fn with_max_levels(initial: Document, max_levels: usize) -> Self {
        Self {
            snapshots: vec![initial],
            current_index: 0,
            max_levels,
        }
    }

    /// Record a new snapshot after the current one, discarding redo history
    pub fn push(&mut self, doc: Document) {
        self.snapshots.truncate(self.current_index + 1);
        self.snapshots.push(doc);

        if self.max_levels > 0 && self.snapshots.len() > self.max_levels + 1 {
            let excess = self.snapshots.len() - (self.max_levels + 1);
            self.snapshots.drain(..excess);
        }

        self.current_index = self.snapshots.len() - 1;
        trace!(index = self.current_index, len = self.snapshots.len(), "history push");
    }

    /// Step back one snapshot; `None` at the lower bound
    pub fn back(&mut self) -> Option<&Document> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        Some(&self.snapshots[self.current_index])
    }

    /// Step forward one snapshot; `None` at the upper bound
    pub fn forward(&mut self) -> Option<&Document> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        Some(&self.snapshots[self.current_index])
    }

    /// Drop all snapshots and start over from `doc`
    pub fn reset(&mut self, doc: Document) {
        self.snapshots.clear();
        self.snapshots.push(doc);
        self.current_index = 0;
    }

    pub fn current(&self) -> &Document {
        &self.snapshots[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn snapshots(&self) -> &[Document] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.snapshots.len()
    }

    /// Number of undo steps available
    pub fn undo_levels(&self) -> usize {
        self.current_index
    }

    /// Number of redo steps available
    pub fn redo_levels(&self) -> usize {
        self.snapshots.len() - 1 - self.current_index
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }
}
