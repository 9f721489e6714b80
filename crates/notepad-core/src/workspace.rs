//! Multi-document workspace: the tab strip without the widgets.
//!
//! A [`Workspace`] owns every open [`Document`], addresses them by stable [`DocumentId`]
//! handles, tracks the tab order and the active document, and enforces the one-document-
//! per-file rule. Hosts map ids to tabs; ids stay valid while the document is open no
//! matter how many neighbors are closed or reordered.

use crate::document::{Document, DocumentError};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Prefix of the synthetic names given to never-saved documents.
const UNSAVED_NAME_PREFIX: &str = "Unsaved Document ";

/// Stable handle to an open document.
///
/// Allocated once per document and never reused within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// The raw numeric value, for logging and host-side maps.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Workspace-level errors.
#[derive(Debug)]
pub enum WorkspaceError {
    /// The document handle does not refer to an open document.
    DocumentNotFound(DocumentId),
    /// The operation requires an active document but the workspace is empty.
    Empty,
    /// The file is already open in another document.
    AlreadyOpen(PathBuf),
    /// A document-level operation failed.
    Document(DocumentError),
}

impl std::fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceError::DocumentNotFound(id) => {
                write!(f, "no open document with id {}", id.get())
            }
            WorkspaceError::Empty => write!(f, "workspace has no documents"),
            WorkspaceError::AlreadyOpen(path) => {
                write!(f, "{} is already open", path.display())
            }
            WorkspaceError::Document(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorkspaceError::Document(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DocumentError> for WorkspaceError {
    fn from(err: DocumentError) -> Self {
        WorkspaceError::Document(err)
    }
}

/// All open documents, their tab order, and the active selection.
#[derive(Default)]
pub struct Workspace {
    next_id: u64,
    documents: BTreeMap<DocumentId, Document>,
    order: Vec<DocumentId>,
    path_to_doc: HashMap<PathBuf, DocumentId>,
    active: Option<DocumentId>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("documents", &self.documents.len())
            .field("active", &self.active)
            .finish()
    }
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no documents are open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document ids in tab order.
    pub fn order(&self) -> &[DocumentId] {
        &self.order
    }

    /// The active document's id, if any document is open.
    pub fn active_id(&self) -> Option<DocumentId> {
        self.active
    }

    /// The active document.
    pub fn active(&self) -> Result<&Document, WorkspaceError> {
        let id = self.active.ok_or(WorkspaceError::Empty)?;
        self.get(id)
    }

    /// The active document, mutably.
    pub fn active_mut(&mut self) -> Result<&mut Document, WorkspaceError> {
        let id = self.active.ok_or(WorkspaceError::Empty)?;
        self.get_mut(id)
    }

    /// Make the given document active.
    pub fn set_active(&mut self, id: DocumentId) -> Result<(), WorkspaceError> {
        if !self.documents.contains_key(&id) {
            return Err(WorkspaceError::DocumentNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Look up a document by id.
    pub fn get(&self, id: DocumentId) -> Result<&Document, WorkspaceError> {
        self.documents
            .get(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))
    }

    /// Look up a document by id, mutably.
    pub fn get_mut(&mut self, id: DocumentId) -> Result<&mut Document, WorkspaceError> {
        self.documents
            .get_mut(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))
    }

    /// The id of the document backed by `path`, if that file is open.
    pub fn document_id_for_path(&self, path: &Path) -> Option<DocumentId> {
        self.path_to_doc.get(path).copied()
    }

    /// Create a new empty unsaved document, append it to the tab order, and activate it.
    ///
    /// The document is named `Unsaved Document N` using the smallest positive `N` not
    /// taken by another unsaved document, so closing "Unsaved Document 2" frees that name
    /// for the next one.
    pub fn add_unsaved(&mut self) -> DocumentId {
        let name = self.next_unused_unsaved_name();
        self.insert_document(Document::new_unsaved(name))
    }

    /// Open `path` as a new document, append it to the tab order, and activate it.
    ///
    /// Each file may be open at most once; a second open of the same path fails with
    /// [`WorkspaceError::AlreadyOpen`]. On I/O failure no document is added and the
    /// workspace is unchanged.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<DocumentId, WorkspaceError> {
        let path = path.into();
        if self.path_to_doc.contains_key(&path) {
            return Err(WorkspaceError::AlreadyOpen(path));
        }

        let document = Document::open(&path)?;
        let id = self.insert_document(document);
        self.path_to_doc.insert(path, id);
        Ok(id)
    }

    /// Close a document and return it to the caller.
    ///
    /// Unsaved changes are discarded with the returned document if the caller drops it;
    /// any save-before-close policy lives in the host. If the closed document was active,
    /// its predecessor in tab order becomes active (or the new first tab when the first
    /// one was closed). Closing the last document leaves the workspace empty.
    pub fn close(&mut self, id: DocumentId) -> Result<Document, WorkspaceError> {
        let document = self
            .documents
            .remove(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))?;

        if let Some(path) = document.path() {
            self.path_to_doc.remove(path);
        }

        let pos = self.order.iter().position(|open| *open == id);
        if let Some(pos) = pos {
            self.order.remove(pos);
        }

        if self.active == Some(id) {
            self.active = match pos {
                _ if self.order.is_empty() => None,
                Some(pos) => Some(self.order[pos.saturating_sub(1)]),
                None => Some(self.order[0]),
            };
        }

        Ok(document)
    }

    /// Save a document, optionally to a new target path (save-as).
    ///
    /// A save-as target that is already backing another open document is rejected before
    /// anything is written. The path index follows the document's path even when the write
    /// itself fails, because a failed save-as still rebinds the document to the target.
    pub fn save(&mut self, id: DocumentId, target: Option<&Path>) -> Result<(), WorkspaceError> {
        if let Some(target) = target
            && let Some(other) = self.document_id_for_path(target)
            && other != id
        {
            return Err(WorkspaceError::AlreadyOpen(target.to_path_buf()));
        }

        let document = self
            .documents
            .get_mut(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))?;

        let old_path = document.path().map(Path::to_path_buf);
        let result = document.save(target);
        let new_path = document.path().map(Path::to_path_buf);

        if old_path != new_path {
            if let Some(old_path) = old_path {
                self.path_to_doc.remove(&old_path);
            }
            if let Some(new_path) = new_path {
                self.path_to_doc.insert(new_path, id);
            }
        }

        result.map_err(WorkspaceError::from)
    }

    /// Save the active document, optionally to a new target path.
    pub fn save_active(&mut self, target: Option<&Path>) -> Result<(), WorkspaceError> {
        let id = self.active.ok_or(WorkspaceError::Empty)?;
        self.save(id, target)
    }

    /// Rebind a document's file path without writing, keeping the path index in sync.
    pub fn rename(&mut self, id: DocumentId, new_path: impl Into<PathBuf>) -> Result<(), WorkspaceError> {
        let new_path = new_path.into();
        if let Some(other) = self.document_id_for_path(&new_path)
            && other != id
        {
            return Err(WorkspaceError::AlreadyOpen(new_path));
        }

        let document = self
            .documents
            .get_mut(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))?;

        if let Some(old_path) = document.path() {
            self.path_to_doc.remove(old_path);
        }
        document.rename(new_path.clone());
        self.path_to_doc.insert(new_path, id);
        Ok(())
    }

    fn insert_document(&mut self, document: Document) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.documents.insert(id, document);
        self.order.push(id);
        self.active = Some(id);
        id
    }

    fn next_unused_unsaved_name(&self) -> String {
        let taken: Vec<u32> = self
            .documents
            .values()
            .filter(|doc| doc.path().is_none())
            .filter_map(|doc| {
                doc.display_name()
                    .strip_prefix(UNSAVED_NAME_PREFIX)?
                    .trim()
                    .parse()
                    .ok()
            })
            .collect();

        let mut n = 1;
        while taken.contains(&n) {
            n += 1;
        }
        format!("{}{}", UNSAVED_NAME_PREFIX, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_workspace() {
        let workspace = Workspace::new();
        assert!(workspace.is_empty());
        assert!(matches!(workspace.active(), Err(WorkspaceError::Empty)));
    }

    #[test]
    fn test_add_unsaved_names_and_activates() {
        let mut workspace = Workspace::new();
        let first = workspace.add_unsaved();
        let second = workspace.add_unsaved();

        assert_eq!(workspace.get(first).unwrap().display_name(), "Unsaved Document 1");
        assert_eq!(workspace.get(second).unwrap().display_name(), "Unsaved Document 2");
        assert_eq!(workspace.active_id(), Some(second));
        assert_eq!(workspace.order(), &[first, second]);
    }

    #[test]
    fn test_closing_frees_unsaved_name() {
        let mut workspace = Workspace::new();
        let _first = workspace.add_unsaved();
        let second = workspace.add_unsaved();
        let _third = workspace.add_unsaved();

        workspace.close(second).unwrap();
        let reused = workspace.add_unsaved();
        assert_eq!(workspace.get(reused).unwrap().display_name(), "Unsaved Document 2");
    }

    #[test]
    fn test_close_activates_predecessor() {
        let mut workspace = Workspace::new();
        let first = workspace.add_unsaved();
        let second = workspace.add_unsaved();
        let third = workspace.add_unsaved();

        workspace.set_active(second).unwrap();
        workspace.close(second).unwrap();
        assert_eq!(workspace.active_id(), Some(first));
        assert_eq!(workspace.order(), &[first, third]);
    }

    #[test]
    fn test_close_first_activates_new_first() {
        let mut workspace = Workspace::new();
        let first = workspace.add_unsaved();
        let second = workspace.add_unsaved();

        workspace.set_active(first).unwrap();
        workspace.close(first).unwrap();
        assert_eq!(workspace.active_id(), Some(second));
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut workspace = Workspace::new();
        let first = workspace.add_unsaved();
        let second = workspace.add_unsaved();

        workspace.close(first).unwrap();
        assert_eq!(workspace.active_id(), Some(second));
    }

    #[test]
    fn test_close_last_document_empties_workspace() {
        let mut workspace = Workspace::new();
        let only = workspace.add_unsaved();
        let closed = workspace.close(only).unwrap();
        assert_eq!(closed.display_name(), "Unsaved Document 1");
        assert!(workspace.is_empty());
        assert!(matches!(workspace.active_mut(), Err(WorkspaceError::Empty)));
    }

    #[test]
    fn test_ids_are_stable_and_never_reused() {
        let mut workspace = Workspace::new();
        let first = workspace.add_unsaved();
        let second = workspace.add_unsaved();

        workspace.close(first).unwrap();
        let third = workspace.add_unsaved();
        assert_ne!(third, first);
        assert_ne!(third, second);
        assert!(workspace.get(second).is_ok());
        assert!(matches!(
            workspace.get(first),
            Err(WorkspaceError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_stale_id_after_close() {
        let mut workspace = Workspace::new();
        let id = workspace.add_unsaved();
        workspace.close(id).unwrap();
        assert!(matches!(
            workspace.set_active(id),
            Err(WorkspaceError::DocumentNotFound(_))
        ));
    }
}
