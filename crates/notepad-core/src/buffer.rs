//! Rope-backed text buffer with undo/redo and modification tracking.
//!
//! All offsets are character offsets (Unicode scalar values) and all ranges are half-open.
//! Content mutations go through [`TextBuffer::insert`] / [`TextBuffer::delete`] /
//! [`TextBuffer::set_text`], each of which records an invertible edit. Loading a file uses
//! [`TextBuffer::reset`] instead, which establishes a fresh baseline: history is cleared and
//! the buffer reports unmodified, so a freshly opened document can never be undone back to
//! emptiness.

use crate::history::{EditHistory, EditKind, EditRecord};
use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// Errors for invalid buffer offsets and ranges.
///
/// These indicate a caller-side contract violation rather than a recoverable condition;
/// callers should treat them as defects, not catch-and-ignore them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// An offset beyond the end of the buffer.
    OffsetOutOfBounds {
        /// The offending character offset.
        offset: usize,
        /// Buffer length in characters.
        len: usize,
    },
    /// A range with `start > end` or `end` beyond the end of the buffer.
    InvalidRange {
        /// Inclusive start character offset.
        start: usize,
        /// Exclusive end character offset.
        end: usize,
        /// Buffer length in characters.
        len: usize,
    },
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {} out of bounds (buffer length {})", offset, len)
            }
            BufferError::InvalidRange { start, end, len } => {
                write!(f, "invalid range {}..{} (buffer length {})", start, end, len)
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// In-memory mutable text content of one document.
#[derive(Debug)]
pub struct TextBuffer {
    rope: Rope,
    cursor: usize,
    history: EditHistory,
    version: u64,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a buffer pre-populated with `text`, with a clean history baseline.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
            history: EditHistory::new(),
            version: 0,
        }
    }

    /// Total length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of logical lines.
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// The entire content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Content of the half-open character range `start..end`.
    pub fn text_range(&self, start: usize, end: usize) -> Result<String, BufferError> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// Version counter, incremented on every content change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Insert `text` at the given character offset.
    ///
    /// Records an invertible edit, clears the redo stack, and places the cursor at the end
    /// of the inserted text.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), BufferError> {
        self.check_offset(offset)?;
        if text.is_empty() {
            return Ok(());
        }

        self.rope.insert(offset, text);
        let record = EditRecord::insert(offset, text);
        self.cursor = record.end();
        self.history.record(record);
        self.version += 1;
        Ok(())
    }

    /// Delete the half-open character range `start..end`, returning the removed text.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String, BufferError> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(String::new());
        }

        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        self.history.record(EditRecord::delete(start, removed.clone()));
        self.cursor = start;
        self.version += 1;
        Ok(removed)
    }

    /// Replace the entire content as a regular, undoable edit.
    ///
    /// Recorded as a delete-all followed by an insert; undoing twice restores the previous
    /// content. For loading a file use [`TextBuffer::reset`], which does not leave undo
    /// records behind.
    pub fn set_text(&mut self, text: &str) {
        let old = self.rope.to_string();
        if old == text {
            return;
        }

        if !old.is_empty() {
            self.history.record(EditRecord::delete(0, old));
        }
        self.rope = Rope::from_str(text);
        if !text.is_empty() {
            self.history.record(EditRecord::insert(0, text));
        }
        self.cursor = self.rope.len_chars();
        self.version += 1;
    }

    /// Replace the entire content and establish a fresh baseline.
    ///
    /// History is cleared and the buffer reports unmodified. Used when loading a document
    /// from disk.
    pub fn reset(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = 0;
        self.history.clear();
        self.version += 1;
    }

    /// Undo the most recent edit.
    ///
    /// Returns the record that was undone (as originally applied), or `None` if there was
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<EditRecord> {
        let record = self.history.undo()?;
        match record.kind {
            EditKind::Insert => {
                self.rope.remove(record.offset..record.end());
                self.cursor = record.offset;
            }
            EditKind::Delete => {
                self.rope.insert(record.offset, &record.text);
                self.cursor = record.end();
            }
        }
        self.version += 1;
        Some(record)
    }

    /// Reapply the most recently undone edit.
    ///
    /// Returns the record that was reapplied, or `None` if there was nothing to redo.
    pub fn redo(&mut self) -> Option<EditRecord> {
        let record = self.history.redo()?;
        match record.kind {
            EditKind::Insert => {
                self.rope.insert(record.offset, &record.text);
                self.cursor = record.end();
            }
            EditKind::Delete => {
                self.rope.remove(record.offset..record.end());
                self.cursor = record.offset;
            }
        }
        self.version += 1;
        Some(record)
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether content differs from the last saved/loaded state.
    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }

    /// Mark the current content as saved.
    pub fn mark_saved(&mut self) {
        self.history.mark_clean();
    }

    /// Current cursor position as a character offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Place the cursor at the given character offset.
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), BufferError> {
        self.check_offset(offset)?;
        self.cursor = offset;
        Ok(())
    }

    /// Move the cursor one grapheme cluster to the left, returning the new offset.
    ///
    /// A single step crosses a full cluster (CRLF, emoji sequences), never landing inside
    /// one.
    pub fn move_cursor_left(&mut self) -> usize {
        if self.cursor == 0 {
            return 0;
        }

        let mut line_idx = self.rope.char_to_line(self.cursor);
        let mut line_start = self.rope.line_to_char(line_idx);
        if self.cursor == line_start {
            // At the start of a line; step into the previous line's trailing newline.
            line_idx -= 1;
            line_start = self.rope.line_to_char(line_idx);
        }

        let line = self.rope.line(line_idx).to_string();
        let byte_idx = char_to_byte(&line, self.cursor - line_start);
        if let Some(grapheme) = line[..byte_idx].graphemes(true).next_back() {
            self.cursor -= grapheme.chars().count();
        }
        self.cursor
    }

    /// Move the cursor one grapheme cluster to the right, returning the new offset.
    pub fn move_cursor_right(&mut self) -> usize {
        if self.cursor >= self.rope.len_chars() {
            return self.cursor;
        }

        let line_idx = self.rope.char_to_line(self.cursor);
        let line_start = self.rope.line_to_char(line_idx);
        let line = self.rope.line(line_idx).to_string();
        let byte_idx = char_to_byte(&line, self.cursor - line_start);
        if let Some(grapheme) = line[byte_idx..].graphemes(true).next() {
            self.cursor += grapheme.chars().count();
        }
        self.cursor
    }

    fn check_offset(&self, offset: usize) -> Result<(), BufferError> {
        let len = self.rope.len_chars();
        if offset > len {
            return Err(BufferError::OffsetOutOfBounds { offset, len });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), BufferError> {
        let len = self.rope.len_chars();
        if start > end || end > len {
            return Err(BufferError::InvalidRange { start, end, len });
        }
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a character offset within `text` to a byte offset.
fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}
