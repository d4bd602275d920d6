// ============================================================================
// UNDO HISTORY — whole-canvas snapshot stack
// ============================================================================

use crate::canvas::Framebuffer;

/// LIFO stack of full-framebuffer snapshots.
///
/// The last entry always mirrors the current visible state; the first entry
/// is the initial load state and acts as the undo floor — it is never
/// discarded. There is no redo.
///
/// Whole-canvas snapshots are deliberate: commits here (cut / paint) touch
/// arbitrarily large regions, so patch-based undo would routinely degenerate
/// to full copies anyway.
pub struct SnapshotHistory {
    snapshots: Vec<Framebuffer>,
}

impl SnapshotHistory {
    /// Start a history with the load-time framebuffer as its floor.
    pub fn new(initial: Framebuffer) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    /// Append a snapshot of the state after a commit.
    pub fn push(&mut self, snapshot: Framebuffer) {
        self.snapshots.push(snapshot);
    }

    /// Discard the newest snapshot and return the one to restore.
    ///
    /// No-op (returns `None`) when only the floor remains.
    pub fn undo(&mut self) -> Option<&Framebuffer> {
        if self.snapshots.len() < 2 {
            return None;
        }
        self.snapshots.pop();
        self.snapshots.last()
    }

    /// Snapshot currently mirroring the visible state.
    pub fn current(&self) -> &Framebuffer {
        // The stack is never empty: constructed with one entry, undo keeps it.
        &self.snapshots[self.snapshots.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Total bytes held by all snapshots (status display).
    pub fn memory_size(&self) -> usize {
        self.snapshots.iter().map(|s| s.memory_size()).sum()
    }
}
