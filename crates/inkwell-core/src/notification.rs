//! Messages pushed from the controller to a window.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One-way notifications delivered to a single window.
///
/// Every variant has a stable event name (see [`WindowNotification::event_name`])
/// that the UI subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WindowNotification {
    /// A document was read; the editor should show `content` and clear its
    /// unsaved indicator.
    FileOpened { content: String, path: PathBuf },
    /// Opening `path` failed.
    OpenFileError { path: PathBuf, error: String },
    /// The open dialog was dismissed.
    OpenFileCancelled,
    /// A save or export wrote `path`.
    FileSaved { path: PathBuf },
    /// A save or export write failed.
    SaveFileError { error: String },
    /// The save or export dialog was dismissed.
    SaveFileCancelled,
    /// Presentation hint: whether the window currently holds unsaved changes,
    /// with the document's display title.
    DocumentEdited { edited: bool, title: String },
}

impl WindowNotification {
    /// Event name used on the wire.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::FileOpened { .. } => "file-opened",
            Self::OpenFileError { .. } => "open-file-error",
            Self::OpenFileCancelled => "open-file-cancelled",
            Self::FileSaved { .. } => "file-saved",
            Self::SaveFileError { .. } => "save-file-error",
            Self::SaveFileCancelled => "save-file-cancelled",
            Self::DocumentEdited { .. } => "document-edited",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::OpenFileError { .. } | Self::SaveFileError { .. })
    }
}
