//! Unified path management for inkwell's own files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/inkwell/            # Config directory (platform default via `dirs`)
//! ├── config.toml               # EditorConfig
//! ├── recent.toml               # Recent documents list
//! └── logs/                     # Application logs
//!     └── inkwell-desktop.log.YYYY-MM-DD
//! ```
//!
//! Documents themselves live wherever the user puts them; nothing here
//! constrains document paths.

use std::path::PathBuf;

const APP_DIR_NAME: &str = "inkwell";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither the platform config directory nor the home directory could be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves inkwell's configuration paths.
///
/// `base_dir` overrides the platform config directory; tests point it at a
/// temporary directory.
#[derive(Debug, Clone, Default)]
pub struct InkwellPaths {
    base_dir: Option<PathBuf>,
}

impl InkwellPaths {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    /// Returns the inkwell configuration directory (e.g. `~/.config/inkwell/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn recent_documents_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("recent.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Directory the open dialog starts in when nothing better is known.
    pub fn default_documents_dir() -> Option<PathBuf> {
        dirs::document_dir().or_else(dirs::home_dir)
    }
}
