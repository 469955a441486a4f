//! Snapshot history for undo.

use crate::layer::LayerSet;

/// Default number of undoable gestures kept.
pub const MAX_UNDO_HISTORY: usize = 50;

/// Linear stack of layer set snapshots.
///
/// The bottom entry is the baseline (the state at session start or after a
/// grid rebuild) and is never popped. Every gesture pushes the state from
/// just before it began; undo pops that entry and hands it back for
/// restoring. There is no redo branch.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<LayerSet>,
    limit: usize,
}

impl HistoryStack {
    /// Create a history whose baseline is `baseline`.
    pub fn new(baseline: LayerSet, limit: usize) -> Self {
        assert!(limit > 0, "history limit must be at least 1");
        Self {
            entries: vec![baseline],
            limit,
        }
    }

    /// Record the state before a gesture.
    pub fn begin_gesture(&mut self, layers: &LayerSet) {
        self.entries.push(layers.clone());

        // The oldest entry is dropped; the next one becomes the floor.
        if self.entries.len() > self.limit + 1 {
            self.entries.remove(0);
        }
    }

    /// Pop the most recent snapshot. Returns `None` when only the baseline
    /// is left.
    pub fn undo(&mut self) -> Option<LayerSet> {
        if self.can_undo() {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Whether an undo would do anything.
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    /// Number of entries, baseline included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the baseline is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn top(&self) -> Option<&LayerSet> {
        self.entries.last()
    }

    /// Drop all entries and start over from a new baseline.
    pub fn reset(&mut self, baseline: LayerSet) {
        self.entries.clear();
        self.entries.push(baseline);
    }
}
