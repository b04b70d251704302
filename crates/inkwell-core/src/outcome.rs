use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a save, save-as or export request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Content was written to the path.
    Saved(PathBuf),
    /// Content matched the persisted baseline; nothing was written.
    Unchanged,
    /// The destination dialog was dismissed.
    Cancelled,
    /// The write failed; the session keeps its previous baseline.
    Failed(String),
}

/// Result of an open request that went through the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum OpenOutcome {
    Opened(PathBuf),
    Cancelled,
}
