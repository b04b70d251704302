//! Editor configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::gateway::FileFilter;

pub const DEFAULT_UNTITLED_NAME: &str = "untitled.md";
pub const DEFAULT_RECENT_DOCUMENTS_LIMIT: usize = 10;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// Filter applied to open and save dialogs for documents.
    pub documents: FileFilter,
    /// Filter applied to the export dialog.
    pub export: FileFilter,
    /// File name suggested when saving a document that has no path yet.
    pub untitled_name: String,
    /// Maximum number of entries kept in the recent documents list.
    pub recent_documents_limit: usize,
    /// Show the open dialog as soon as the first window is ready.
    pub open_dialog_on_startup: bool,
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            documents: FileFilter::new("Markdown File", ["md"]),
            export: FileFilter::new("HTML File", ["html"]),
            untitled_name: DEFAULT_UNTITLED_NAME.to_string(),
            recent_documents_limit: DEFAULT_RECENT_DOCUMENTS_LIMIT,
            open_dialog_on_startup: true,
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Suggested export file name: the document's stem with the export
    /// extension, or `untitled.<ext>` for untitled documents.
    pub fn export_file_name(&self, document: Option<&Path>) -> PathBuf {
        let extension = self.export.primary_extension().unwrap_or("html");
        let stem = document
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        PathBuf::from(format!("{stem}.{extension}"))
    }
}
