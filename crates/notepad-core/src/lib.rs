#![warn(missing_docs)]
//! `notepad-core` - the headless document model of a multi-tab text editor.
//!
//! This crate owns everything about open documents that is not pixels: buffer content
//! with full undo/redo, rich-text attribute spans, file identity (open/save/save-as),
//! derived tab labels, and a multi-document [`Workspace`] with stable handles. It renders
//! nothing and opens no windows; hosts subscribe to plain-data change events and drive
//! their own UI toolkit from them.
//!
//! # Quick start
//!
//! ```
//! use notepad_core::{TextAttribute, Workspace};
//!
//! let mut workspace = Workspace::new();
//! let id = workspace.add_unsaved();
//!
//! let doc = workspace.get_mut(id)?;
//! doc.insert(0, "hello")?;
//! doc.insert(5, " world")?;
//! doc.toggle_attribute(TextAttribute::Bold, 0, 5)?;
//! assert_eq!(doc.display_label(), "*Unsaved Document 1");
//!
//! assert!(doc.undo());
//! assert_eq!(doc.buffer().text(), "hello");
//! assert!(doc.undo());
//! assert_eq!(doc.buffer().text(), "");
//! assert!(!doc.buffer().can_undo());
//! # Ok::<(), notepad_core::WorkspaceError>(())
//! ```
//!
//! # Architecture
//!
//! - [`buffer`]: [`TextBuffer`], rope-backed content with a cursor and per-buffer
//!   [`history`](crate::history).
//! - [`spans`]: [`SpanSet`] keeps bold/italic/underline ranges anchored through edits.
//! - [`document`]: [`Document`] ties a buffer, its spans, and a file path together and
//!   emits [`DocumentChange`] events.
//! - [`workspace`]: [`Workspace`] manages the open set, tab order, and active document.
//!
//! Language detection for the highlighting toggle lives in the companion `notepad-lang`
//! crate and is re-exported here as [`LanguageInfo`].

pub mod buffer;
pub mod document;
pub mod history;
pub mod spans;
pub mod workspace;

pub use buffer::{BufferError, TextBuffer};
pub use document::{
    Document, DocumentChange, DocumentChangeCallback, DocumentError, compute_label,
};
pub use history::{EditHistory, EditKind, EditRecord};
pub use spans::{Justification, SpanSet, StyleSpan, TextAttribute};
pub use workspace::{DocumentId, Workspace, WorkspaceError};

pub use notepad_lang::LanguageInfo;
