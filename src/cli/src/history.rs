use std::collections::VecDeque;

use scramble_core::ScrambleSequence;

/// Bounded undo/redo stack of whole sequences. When full, the oldest entry is
/// forgotten.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo: VecDeque<ScrambleSequence>,
    redo: Vec<ScrambleSequence>,
    depth: usize,
}

impl EditHistory {
    /// # Panics
    ///
    /// Panics if `depth` is zero.
    #[must_use]
    pub fn new(depth: usize) -> EditHistory {
        assert!(depth > 0, "An edit history needs room for one entry");
        EditHistory {
            undo: VecDeque::with_capacity(depth),
            redo: vec![],
            depth,
        }
    }

    /// Remember `previous` as the state before an edit. Any redo entries are
    /// dropped.
    pub fn record(&mut self, previous: ScrambleSequence) {
        if self.undo.len() == self.depth {
            self.undo.pop_front();
        }
        self.undo.push_back(previous);
        self.redo.clear();
    }

    /// Step back, given the current sequence. `None` when nothing is left.
    pub fn undo(&mut self, current: ScrambleSequence) -> Option<ScrambleSequence> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    pub fn redo(&mut self, current: ScrambleSequence) -> Option<ScrambleSequence> {
        let next = self.redo.pop()?;
        if self.undo.len() == self.depth {
            self.undo.pop_front();
        }
        self.undo.push_back(current);
        Some(next)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> ScrambleSequence {
        ScrambleSequence::from_text(text)
    }

    #[test]
    fn undo_then_redo() {
        let mut history = EditHistory::new(8);
        history.record(seq("R"));
        history.record(seq("R U"));

        let current = history.undo(seq("R U F")).unwrap();
        assert_eq!(current, seq("R U"));
        let current = history.undo(current).unwrap();
        assert_eq!(current, seq("R"));
        assert!(!history.can_undo());
        assert_eq!(history.undo(current.clone()), None);

        let current = history.redo(current).unwrap();
        assert_eq!(current, seq("R U"));
        let current = history.redo(current).unwrap();
        assert_eq!(current, seq("R U F"));
        assert!(!history.can_redo());
    }

    #[test]
    fn new_edits_drop_redo() {
        let mut history = EditHistory::new(8);
        history.record(seq("R"));
        let current = history.undo(seq("R U")).unwrap();
        assert!(history.can_redo());

        history.record(current);
        assert!(!history.can_redo());
    }

    #[test]
    fn oldest_entries_fall_off() {
        let mut history = EditHistory::new(2);
        for text in ["R", "R U", "R U F"] {
            history.record(seq(text));
        }

        let current = history.undo(seq("R U F B")).unwrap();
        let current = history.undo(current).unwrap();
        assert_eq!(current, seq("R U"));
        assert_eq!(history.undo(current), None);
    }
}
