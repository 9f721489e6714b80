//! Edit records and the undo/redo history.
//!
//! Every content mutation of a [`crate::TextBuffer`] is recorded as an invertible
//! [`EditRecord`]. [`EditHistory`] keeps the undo/redo stacks plus a *clean index*: the
//! undo-stack depth at which the buffer last matched its saved (or freshly loaded) state.
//! The modified flag is derived from it, so undoing back to the save point reports the
//! buffer as unmodified again, and redoing past it flips it back.

/// Default maximum number of retained undo records.
const DEFAULT_MAX_DEPTH: usize = 1000;

/// Kind of a recorded content edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Text was inserted at `offset`.
    Insert,
    /// Text was deleted starting at `offset`.
    Delete,
}

/// An invertible content edit.
///
/// `offset` is a character offset into the buffer at the time the edit was applied, and
/// `text` is the full inserted (or deleted) text, which is sufficient to invert the
/// operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    /// What happened.
    pub kind: EditKind,
    /// Character offset where the edit took place.
    pub offset: usize,
    /// The inserted or deleted text.
    pub text: String,
}

impl EditRecord {
    /// Record an insertion of `text` at `offset`.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Insert,
            offset,
            text: text.into(),
        }
    }

    /// Record a deletion of `text` that started at `offset`.
    pub fn delete(offset: usize, text: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            offset,
            text: text.into(),
        }
    }

    /// Length of the affected text in characters.
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Exclusive end offset of the affected range.
    pub fn end(&self) -> usize {
        self.offset + self.len_chars()
    }
}

/// Undo/redo stacks with bounded depth and clean-point tracking.
#[derive(Debug)]
pub struct EditHistory {
    undo_stack: Vec<EditRecord>,
    redo_stack: Vec<EditRecord>,
    max_depth: usize,
    /// Saved position in the linear history, expressed as an undo-stack depth. `None` means
    /// the saved state is no longer reachable (it was trimmed, or stranded in a cleared
    /// redo area).
    clean_index: Option<usize>,
}

impl EditHistory {
    /// Create an empty history with the default depth limit.
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create an empty history retaining at most `max_depth` undo records.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
            clean_index: Some(0),
        }
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of records on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of records on the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Whether the current position in history matches the last saved state.
    pub fn is_clean(&self) -> bool {
        self.clean_index == Some(self.undo_stack.len())
    }

    /// Mark the current position as the saved state.
    pub fn mark_clean(&mut self) {
        self.clean_index = Some(self.undo_stack.len());
    }

    /// Drop all records and treat the current content as the saved baseline.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.clean_index = Some(0);
    }

    fn clear_redo_and_adjust_clean(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }

        // If the clean point sits in the redo area it becomes unreachable once redo is
        // cleared.
        if let Some(clean_index) = self.clean_index
            && clean_index > self.undo_stack.len()
        {
            self.clean_index = None;
        }

        self.redo_stack.clear();
    }

    /// Push a new edit, clearing the redo stack and trimming to the depth limit.
    pub fn record(&mut self, edit: EditRecord) {
        self.clear_redo_and_adjust_clean();

        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean_index) => Some(clean_index - 1),
            };
        }

        self.undo_stack.push(edit);
    }

    /// Pop the most recent edit, moving it to the redo stack.
    ///
    /// Returns the record as originally applied; the caller is responsible for applying
    /// its inverse to the content.
    pub fn undo(&mut self) -> Option<EditRecord> {
        let record = self.undo_stack.pop()?;
        self.redo_stack.push(record.clone());
        Some(record)
    }

    /// Pop the most recently undone edit, moving it back to the undo stack.
    ///
    /// Returns the record as originally applied; the caller reapplies it to the content.
    pub fn redo(&mut self) -> Option<EditRecord> {
        let record = self.redo_stack.pop()?;
        self.undo_stack.push(record.clone());
        Some(record)
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}
