use crate::annotation::AnnotationSet;

/// Linear undo/redo history of annotation-set snapshots.
///
/// An arena of immutable sets indexed by `step`. Committing while `step` is
/// behind the tail discards everything after it first, so there is never a
/// redo branch. `0 <= step < snapshots.len()` always holds.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<AnnotationSet>,
    step: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Creates a history holding only the empty set
    pub fn new() -> Self {
        Self {
            snapshots: vec![AnnotationSet::empty()],
            step: 0,
        }
    }

    /// Make `next` the current set, dropping any redo tail.
    pub fn commit(&mut self, next: AnnotationSet) {
        self.snapshots.truncate(self.step + 1);
        self.snapshots.push(next);
        self.step = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. No-op at the start of history.
    pub fn undo(&mut self) -> &AnnotationSet {
        if self.can_undo() {
            self.step -= 1;
        }
        self.current()
    }

    /// Step forward one snapshot. No-op at the tail.
    pub fn redo(&mut self) -> &AnnotationSet {
        if self.can_redo() {
            self.step += 1;
        }
        self.current()
    }

    pub fn current(&self) -> &AnnotationSet {
        &self.snapshots[self.step]
    }

    /// Back to a single empty snapshot, for a freshly loaded document.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(AnnotationSet::empty());
        self.step = 0;
    }

    /// Returns true if there is a snapshot before the current one
    pub fn can_undo(&self) -> bool {
        self.step > 0
    }

    /// Returns true if there is a snapshot after the current one
    pub fn can_redo(&self) -> bool {
        self.step + 1 < self.snapshots.len()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true; a history always holds at least the initial snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[AnnotationSet] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_no_ops() {
        let mut history = History::new();
        assert!(history.undo().is_empty());
        assert!(history.redo().is_empty());
        assert_eq!(history.step(), 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn reset_drops_everything() {
        let mut history = History::new();
        history.commit(AnnotationSet::empty());
        history.commit(AnnotationSet::empty());
        history.undo();
        history.reset();
        assert_eq!(history.len(), 1);
        assert_eq!(history.step(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
