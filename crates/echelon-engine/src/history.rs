//! Linear undo/redo history of matrix snapshots.

use std::time::SystemTime;

use echelon_matrix::Matrix;

/// One recorded state: an immutable snapshot plus its label.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Deep copy of the matrix at the time of the push.
    pub matrix: Matrix,
    /// What produced this state, e.g. `"Operation: I = I + 3*II"`.
    pub description: String,
    /// When the entry was recorded.
    pub timestamp: SystemTime,
}

/// An ordered sequence of snapshots with a current position.
///
/// The position is `None` only before the first push; afterwards it always
/// indexes a valid entry. Pushing after an undo discards every entry beyond
/// the position.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    position: Option<usize>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a snapshot, truncating any redo entries first.
    pub fn push(&mut self, matrix: Matrix, description: impl Into<String>) {
        let keep = self.position.map_or(0, |p| p + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry {
            matrix,
            description: description.into(),
            timestamp: SystemTime::now(),
        });
        self.position = Some(self.entries.len() - 1);
    }

    /// Steps back one entry and returns its snapshot; `None` at the start.
    pub fn undo(&mut self) -> Option<&Matrix> {
        let p = self.position?;
        if p == 0 {
            return None;
        }
        self.position = Some(p - 1);
        Some(&self.entries[p - 1].matrix)
    }

    /// Steps forward one entry and returns its snapshot; `None` at the end.
    pub fn redo(&mut self) -> Option<&Matrix> {
        let p = self.position?;
        if p + 1 >= self.entries.len() {
            return None;
        }
        self.position = Some(p + 1);
        Some(&self.entries[p + 1].matrix)
    }

    /// Discards everything except the current entry.
    pub fn clear_to_current(&mut self) {
        if let Some(p) = self.position {
            let current = self.entries.swap_remove(p);
            self.entries.clear();
            self.entries.push(current);
            self.position = Some(0);
        }
    }

    /// Returns the last `n` entries, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Returns the entry at the current position.
    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.position?)
    }

    /// Returns the current position index.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if an undo would move the position.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.position.is_some_and(|p| p > 0)
    }

    /// Returns true if a redo would move the position.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.position.is_some_and(|p| p + 1 < self.entries.len())
    }
}
