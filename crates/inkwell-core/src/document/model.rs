//! Document session model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name shown for documents that were never saved.
pub const UNTITLED_DISPLAY_NAME: &str = "Untitled";

/// The document state belonging to one window.
///
/// Unsaved changes are never stored; they are computed on demand by comparing
/// editor content against `last_persisted_content`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSession {
    /// File on disk backing this document. `None` means untitled.
    pub associated_path: Option<PathBuf>,
    /// Exact text as of the last successful open or save.
    pub last_persisted_content: String,
}

impl DocumentSession {
    /// An untitled session with an empty baseline.
    pub fn untitled() -> Self {
        Self::default()
    }

    /// A session backed by `path` whose content on disk is `content`.
    pub fn persisted(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            associated_path: Some(path.into()),
            last_persisted_content: content.into(),
        }
    }

    pub fn is_untitled(&self) -> bool {
        self.associated_path.is_none()
    }

    pub fn path(&self) -> Option<&Path> {
        self.associated_path.as_deref()
    }

    /// Returns true when `candidate` differs byte-for-byte from the baseline.
    pub fn is_dirty(&self, candidate: &str) -> bool {
        candidate != self.last_persisted_content
    }

    /// File name for window titles, or [`UNTITLED_DISPLAY_NAME`].
    pub fn display_name(&self) -> String {
        self.associated_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED_DISPLAY_NAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_session_is_clean_only_when_empty() {
        let session = DocumentSession::untitled();
        assert!(session.is_untitled());
        assert!(!session.is_dirty(""));
        assert!(session.is_dirty("x"));
    }

    #[test]
    fn test_dirty_compares_exact_bytes() {
        let session = DocumentSession::persisted("/tmp/a.md", "# A\n");
        assert!(!session.is_dirty("# A\n"));
        assert!(session.is_dirty("# A"));
        assert!(session.is_dirty("# A\r\n"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(DocumentSession::untitled().display_name(), "Untitled");
        assert_eq!(
            DocumentSession::persisted("/home/me/notes/todo.md", "").display_name(),
            "todo.md"
        );
    }
}
