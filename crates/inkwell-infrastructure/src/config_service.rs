//! Configuration service implementation.
//!
//! Loads [`EditorConfig`] from `config.toml` in the inkwell config directory.

use inkwell_core::config::EditorConfig;
use inkwell_core::{InkwellError, Result};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use crate::paths::InkwellPaths;
use crate::storage::AtomicTomlFile;

/// Loads and caches the editor configuration.
///
/// A missing file yields the defaults. An unreadable or malformed file is
/// logged and also yields the defaults, so a broken config never keeps the
/// editor from starting.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicTomlFile<EditorConfig>>,
    config: Arc<RwLock<Option<EditorConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates the service for `<config>/config.toml`.
    pub fn default_location(paths: &InkwellPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| InkwellError::config(e.to_string()))?;
        Ok(Self::new(path))
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> EditorConfig {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = match self.file.load() {
            Ok(Some(config)) => config,
            Ok(None) => EditorConfig::default(),
            Err(e) => {
                tracing::warn!("[ConfigService] Using defaults, failed to load config: {}", e);
                EditorConfig::default()
            }
        };

        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(loaded.clone());
        loaded
    }

    /// Writes `config` to disk and refreshes the cache.
    pub fn save(&self, config: &EditorConfig) -> Result<()> {
        self.file.save(config)?;
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config(), EditorConfig::default());
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "untitled_name = ").unwrap();

        assert_eq!(ConfigService::new(path).get_config(), EditorConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "untitled_name = \"notes.md\"\nopen_dialog_on_startup = false\n\n[export]\nname = \"Web Page\"\nextensions = [\"htm\"]\n",
        )
        .unwrap();

        let config = ConfigService::new(path).get_config();
        assert_eq!(config.untitled_name, "notes.md");
        assert!(!config.open_dialog_on_startup);
        assert_eq!(config.export.extensions, vec!["htm".to_string()]);
        assert_eq!(config.documents.name, "Markdown File");
    }

    #[test]
    fn test_save_refreshes_cache() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());
        assert_eq!(service.get_config().recent_documents_limit, 10);

        std::fs::write(&path, "recent_documents_limit = 4\n").unwrap();
        assert_eq!(service.get_config().recent_documents_limit, 10);

        let config = EditorConfig {
            open_dialog_on_startup: false,
            ..EditorConfig::default()
        };
        service.save(&config).unwrap();
        assert_eq!(service.get_config(), config);
    }

    #[test]
    fn test_save_round_trips_through_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let config = EditorConfig {
            recent_documents_limit: 25,
            ..EditorConfig::default()
        };

        ConfigService::new(path.clone()).save(&config).unwrap();

        assert_eq!(ConfigService::new(path).get_config(), config);
    }
}
