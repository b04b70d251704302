//! Window-keyed document session store.

use std::collections::HashMap;
use std::path::PathBuf;

use super::model::{DocumentSession, UNTITLED_DISPLAY_NAME};
use crate::window::WindowId;

/// Maps each window to at most one [`DocumentSession`].
///
/// Entries are created lazily on the first file interaction of a window and
/// removed explicitly when the window is destroyed. The store is owned by the
/// session controller; nothing else mutates it.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<WindowId, DocumentSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, window: WindowId) -> Option<&DocumentSession> {
        self.sessions.get(&window)
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.sessions.contains_key(&window)
    }

    /// Replaces the window's session wholesale (used after a successful open).
    pub fn replace(&mut self, window: WindowId, session: DocumentSession) {
        self.sessions.insert(window, session);
    }

    /// Records a successful write of `content` to `path`, creating the
    /// session if the window had none.
    pub fn record_save(&mut self, window: WindowId, path: PathBuf, content: String) {
        let session = self.sessions.entry(window).or_default();
        session.associated_path = Some(path);
        session.last_persisted_content = content;
    }

    /// Resets the window to an untitled, empty document without dropping
    /// its entry.
    pub fn reset_to_untitled(&mut self, window: WindowId) {
        self.sessions.insert(window, DocumentSession::untitled());
    }

    pub fn remove(&mut self, window: WindowId) -> Option<DocumentSession> {
        self.sessions.remove(&window)
    }

    /// Whether `candidate` holds unsaved changes for `window`.
    ///
    /// Without a session any non-empty content counts as unsaved; with one,
    /// content is compared byte-for-byte against the persisted baseline.
    pub fn is_dirty(&self, window: WindowId, candidate: &str) -> bool {
        match self.sessions.get(&window) {
            Some(session) => session.is_dirty(candidate),
            None => !candidate.is_empty(),
        }
    }

    /// The persisted baseline, or an empty string for windows without a session.
    pub fn baseline(&self, window: WindowId) -> String {
        self.sessions
            .get(&window)
            .map(|session| session.last_persisted_content.clone())
            .unwrap_or_default()
    }

    /// Title for the window: the document's file name or "Untitled".
    pub fn display_name(&self, window: WindowId) -> String {
        self.sessions
            .get(&window)
            .map(DocumentSession::display_name)
            .unwrap_or_else(|| UNTITLED_DISPLAY_NAME.to_string())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
