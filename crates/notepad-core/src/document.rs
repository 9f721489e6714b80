//! A document: one buffer plus its file identity and tagging.
//!
//! [`Document`] pairs a [`TextBuffer`] with a path (or a synthetic unsaved name), owns
//! save/load, and derives the tab label shown by the host. It exposes only plain data and
//! change events; the presentation layer subscribes and updates its own widgets.
//!
//! All content mutation goes through the document (never the buffer directly) so that
//! attribute spans stay anchored to the text and subscribers are notified of every change
//! immediately.

use crate::buffer::{BufferError, TextBuffer};
use crate::history::EditKind;
use crate::spans::{Justification, SpanSet, TextAttribute};
use notepad_lang::{LanguageInfo, guess_language};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Document-level errors.
#[derive(Debug)]
pub enum DocumentError {
    /// Reading or writing the backing file failed.
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// A save was requested for a document that has no file path yet.
    NoFilePath,
    /// An invalid offset or range was passed to an editing operation.
    Buffer(BufferError),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            DocumentError::NoFilePath => {
                write!(f, "document has no file path")
            }
            DocumentError::Buffer(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Io { source, .. } => Some(source),
            DocumentError::NoFilePath => None,
            DocumentError::Buffer(err) => Some(err),
        }
    }
}

impl From<BufferError> for DocumentError {
    fn from(err: BufferError) -> Self {
        DocumentError::Buffer(err)
    }
}

/// Plain-data change notification sent to subscribers after every document change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChange {
    /// Current tab label, `*`-prefixed while modified.
    pub label: String,
    /// Whether the buffer differs from the last saved/loaded state.
    pub modified: bool,
}

/// Callback invoked with every [`DocumentChange`].
pub type DocumentChangeCallback = Box<dyn FnMut(&DocumentChange) + Send>;

/// Derive the tab label for a document name: `*`-prefixed iff modified.
pub fn compute_label(name: &str, modified: bool) -> String {
    if modified {
        format!("*{}", name)
    } else {
        name.to_string()
    }
}

/// An open document: buffer content, attribute spans, and file identity.
pub struct Document {
    buffer: TextBuffer,
    spans: SpanSet,
    path: Option<PathBuf>,
    is_new: bool,
    unsaved_name: String,
    justification: Justification,
    language: Option<&'static LanguageInfo>,
    callbacks: Vec<DocumentChangeCallback>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("is_new", &self.is_new)
            .field("unsaved_name", &self.unsaved_name)
            .field("modified", &self.buffer.is_modified())
            .field("len_chars", &self.buffer.len_chars())
            .finish()
    }
}

impl Document {
    /// Create an empty unsaved document under a synthetic name.
    pub fn new_unsaved(name: impl Into<String>) -> Self {
        let name = name.into();
        let language = guess_language(Path::new(&name));
        Self {
            buffer: TextBuffer::new(),
            spans: SpanSet::new(),
            path: None,
            is_new: true,
            unsaved_name: name,
            justification: Justification::default(),
            language,
            callbacks: Vec::new(),
        }
    }

    /// Open a document from a file.
    ///
    /// Reads the entire file and establishes a fresh undo baseline: a just-opened document
    /// is unmodified and cannot be undone back to emptiness. On I/O failure no document is
    /// constructed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DocumentError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;

        let mut buffer = TextBuffer::new();
        buffer.reset(&text);
        let language = guess_language(&path);

        Ok(Self {
            buffer,
            spans: SpanSet::new(),
            path: Some(path),
            is_new: false,
            unsaved_name: String::new(),
            justification: Justification::default(),
            language,
            callbacks: Vec::new(),
        })
    }

    /// Write the buffer to disk.
    ///
    /// If `target` is given it becomes the permanent file path (and the document stops
    /// being "new") before the write is attempted, mirroring a save-as. The content is
    /// written verbatim with no newline normalization. On success the buffer is marked
    /// saved; on failure the buffer and its modified flag are untouched so the caller can
    /// retry or save elsewhere.
    pub fn save(&mut self, target: Option<&Path>) -> Result<(), DocumentError> {
        if let Some(target) = target {
            self.path = Some(target.to_path_buf());
            self.is_new = false;
            self.language = guess_language(target);
        }

        let Some(path) = self.path.clone() else {
            return Err(DocumentError::NoFilePath);
        };

        fs::write(&path, self.buffer.text()).map_err(|source| DocumentError::Io {
            path: path.clone(),
            source,
        })?;

        self.buffer.mark_saved();
        self.notify();
        Ok(())
    }

    /// Rebind the file path without writing.
    ///
    /// Used when a save-as target changes before the actual write. The label and language
    /// guess update immediately; `is_new` and the modified flag are unaffected.
    pub fn rename(&mut self, new_path: impl Into<PathBuf>) {
        let new_path = new_path.into();
        self.language = guess_language(&new_path);
        self.path = Some(new_path);
        self.notify();
    }

    /// Insert `text` at the given character offset.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        let len = text.chars().count();
        self.buffer.insert(offset, text)?;
        self.spans.update_for_insertion(offset, len);
        self.notify();
        Ok(())
    }

    /// Delete the half-open character range `start..end`, returning the removed text.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String, DocumentError> {
        let removed = self.buffer.delete(start, end)?;
        self.spans.update_for_deletion(start, end);
        self.notify();
        Ok(removed)
    }

    /// Replace the entire content as a regular, undoable edit. Existing spans are dropped
    /// with the content they covered.
    pub fn set_text(&mut self, text: &str) {
        let old_len = self.buffer.len_chars();
        let version = self.buffer.version();
        self.buffer.set_text(text);
        if self.buffer.version() == version {
            // Identical content; nothing changed.
            return;
        }
        self.spans.update_for_deletion(0, old_len);
        self.notify();
    }

    /// Undo the most recent edit. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.buffer.undo() else {
            return false;
        };
        // The inverse of the recorded edit was applied; shift spans the same way.
        match record.kind {
            EditKind::Insert => self.spans.update_for_deletion(record.offset, record.end()),
            EditKind::Delete => self
                .spans
                .update_for_insertion(record.offset, record.len_chars()),
        }
        self.notify();
        true
    }

    /// Reapply the most recently undone edit. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.buffer.redo() else {
            return false;
        };
        match record.kind {
            EditKind::Insert => self
                .spans
                .update_for_insertion(record.offset, record.len_chars()),
            EditKind::Delete => self.spans.update_for_deletion(record.offset, record.end()),
        }
        self.notify();
        true
    }

    /// Toggle `attribute` over the selection `start..end`.
    ///
    /// An empty selection is an accepted no-op; an out-of-bounds range is a contract
    /// violation. Returns whether the attribute is applied afterwards.
    pub fn toggle_attribute(
        &mut self,
        attribute: TextAttribute,
        start: usize,
        end: usize,
    ) -> Result<bool, DocumentError> {
        let len = self.buffer.len_chars();
        if start > end || end > len {
            return Err(BufferError::InvalidRange { start, end, len }.into());
        }
        if start == end {
            return Ok(self.spans.attribute_at(start, attribute));
        }

        let applied = self.spans.toggle(attribute, start, end);
        self.notify();
        Ok(applied)
    }

    /// Set the document-level justification hint.
    pub fn set_justification(&mut self, justification: Justification) {
        self.justification = justification;
        self.notify();
    }

    /// Place the cursor at the given character offset.
    pub fn set_cursor(&mut self, offset: usize) -> Result<(), DocumentError> {
        self.buffer.set_cursor(offset)?;
        Ok(())
    }

    /// Move the cursor one grapheme cluster left, returning the new offset.
    pub fn move_cursor_left(&mut self) -> usize {
        self.buffer.move_cursor_left()
    }

    /// Move the cursor one grapheme cluster right, returning the new offset.
    pub fn move_cursor_right(&mut self) -> usize {
        self.buffer.move_cursor_right()
    }

    /// Subscribe to document changes.
    ///
    /// The callback fires after every content mutation, undo/redo, tagging change, save,
    /// and rename, carrying the freshly derived label and modified flag.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&DocumentChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Read access to the buffer (content, cursor, undo/redo queries).
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Read access to the attribute spans.
    pub fn spans(&self) -> &SpanSet {
        &self.spans
    }

    /// The backing file path, if the document has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether this document has never been saved to its own file.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Whether the buffer differs from the last saved/loaded state.
    pub fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// The bare document name: file basename, or the synthetic unsaved name.
    pub fn display_name(&self) -> String {
        match self.path.as_deref().and_then(Path::file_name) {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.unsaved_name.clone(),
        }
    }

    /// The tab label: the display name, `*`-prefixed while modified.
    pub fn display_label(&self) -> String {
        compute_label(&self.display_name(), self.buffer.is_modified())
    }

    /// The detected language, if the file path (or name) maps to one.
    pub fn language(&self) -> Option<&'static LanguageInfo> {
        self.language
    }

    /// Whether syntax highlighting should be enabled: true iff a language was detected.
    pub fn highlighting_enabled(&self) -> bool {
        self.language.is_some()
    }

    /// The document-level justification hint.
    pub fn justification(&self) -> Justification {
        self.justification
    }

    fn notify(&mut self) {
        let change = DocumentChange {
            label: self.display_label(),
            modified: self.buffer.is_modified(),
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
