//! Interfaces to the collaborators the session controller drives.
//!
//! These traits decouple document session logic from the filesystem, the
//! native dialogs, the window transport and the OS shell. Implementations
//! live in `inkwell-infrastructure` and in the desktop shell.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::notification::WindowNotification;
use crate::window::WindowId;

/// A named extension filter for file dialogs.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new<I, S>(name: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn primary_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// Case-insensitive extension match.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    /// Appends the primary extension to a dialog result that has none.
    ///
    /// Some platform pickers return the name exactly as typed. Paths that
    /// already carry any extension are left alone.
    pub fn with_default_extension(&self, path: PathBuf) -> PathBuf {
        if self.matches(&path) || path.extension().is_some() {
            return path;
        }
        match self.primary_extension() {
            Some(extension) => path.with_extension(extension),
            None => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDialogRequest {
    pub title: String,
    pub filters: Vec<FileFilter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDialogRequest {
    pub title: String,
    /// Pre-filled destination: a full path or just a file name.
    pub default_path: PathBuf,
    pub filters: Vec<FileFilter>,
}

/// Raw text reads and writes of documents.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Reads the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `InkwellError::Read` when the path is missing, unreadable or
    /// not valid UTF-8.
    async fn read(&self, path: &Path) -> Result<String>;

    /// Replaces the file's content with `content`.
    ///
    /// # Errors
    ///
    /// Returns `InkwellError::Write` when the destination cannot be written.
    async fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Native open/save pickers. `None` means the user cancelled.
#[async_trait]
pub trait DialogGateway: Send + Sync {
    async fn choose_open_path(
        &self,
        window: WindowId,
        request: &OpenDialogRequest,
    ) -> Option<PathBuf>;

    async fn choose_save_path(
        &self,
        window: WindowId,
        request: &SaveDialogRequest,
    ) -> Option<PathBuf>;
}

/// Push channel towards a single window.
///
/// Delivery is fire-and-forget: implementations log transport failures
/// instead of returning them.
#[async_trait]
pub trait WindowNotifier: Send + Sync {
    async fn notify(&self, window: WindowId, notification: WindowNotification);
}

/// One entry of the recent documents list.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RecentDocument {
    pub path: PathBuf,
    /// RFC 3339 timestamp of the last open or save.
    pub last_used_at: String,
}

/// The OS-level "recent documents" list.
#[async_trait]
pub trait RecentDocuments: Send + Sync {
    /// Moves `path` to the front of the list.
    async fn record(&self, path: &Path) -> Result<()>;

    /// Entries, most recent first.
    async fn list(&self) -> Result<Vec<RecentDocument>>;

    async fn clear(&self) -> Result<()>;
}

/// Hands paths to the desktop environment.
#[async_trait]
pub trait ShellGateway: Send + Sync {
    /// Reveals `path` in the platform file manager.
    async fn show_in_folder(&self, path: &Path) -> Result<()>;

    /// Opens `path` with the application registered for its type.
    async fn open_in_default_app(&self, path: &Path) -> Result<()>;
}
