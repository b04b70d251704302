//! TOML-backed recent documents list.

use async_trait::async_trait;
use inkwell_core::gateway::{RecentDocument, RecentDocuments};
use inkwell_core::{InkwellError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::paths::InkwellPaths;
use crate::storage::AtomicTomlFile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RecentDocumentsFile {
    #[serde(default)]
    documents: Vec<RecentDocument>,
}

/// Recent documents stored in `recent.toml`, most recent first.
///
/// Paths are de-duplicated and the list is capped at `limit` entries.
pub struct TomlRecentDocumentsRepository {
    file: Arc<AtomicTomlFile<RecentDocumentsFile>>,
    limit: usize,
}

impl TomlRecentDocumentsRepository {
    pub fn new(path: PathBuf, limit: usize) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            limit,
        }
    }

    /// Creates the repository at `<config>/recent.toml`.
    pub fn default_location(paths: &InkwellPaths, limit: usize) -> Result<Self> {
        let path = paths
            .recent_documents_file()
            .map_err(|e| InkwellError::config(e.to_string()))?;
        Ok(Self::new(path, limit))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&AtomicTomlFile<RecentDocumentsFile>) -> Result<R> + Send + 'static,
    {
        let file = Arc::clone(&self.file);
        tokio::task::spawn_blocking(move || f(&file))
            .await
            .map_err(|e| InkwellError::internal(format!("recent documents task failed: {e}")))?
    }
}

#[async_trait]
impl RecentDocuments for TomlRecentDocumentsRepository {
    async fn record(&self, path: &Path) -> Result<()> {
        let entry = RecentDocument {
            path: path.to_path_buf(),
            last_used_at: chrono::Utc::now().to_rfc3339(),
        };
        let limit = self.limit;

        tracing::debug!(
            "[RecentDocuments] Recording {}",
            entry.path.display()
        );

        self.blocking(move |file| {
            file.update(RecentDocumentsFile::default(), |recent| {
                recent.documents.retain(|doc| doc.path != entry.path);
                recent.documents.insert(0, entry);
                recent.documents.truncate(limit);
            })?;
            Ok(())
        })
        .await
    }

    async fn list(&self) -> Result<Vec<RecentDocument>> {
        self.blocking(|file| Ok(file.load()?.unwrap_or_default().documents))
            .await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|file| {
            file.save(&RecentDocumentsFile::default())?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repository(temp_dir: &TempDir, limit: usize) -> TomlRecentDocumentsRepository {
        TomlRecentDocumentsRepository::new(temp_dir.path().join("recent.toml"), limit)
    }

    fn paths(docs: &[RecentDocument]) -> Vec<PathBuf> {
        docs.iter().map(|doc| doc.path.clone()).collect()
    }

    #[tokio::test]
    async fn test_empty_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(repository(&temp_dir, 10).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_most_recent_first_without_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir, 10);

        repo.record(Path::new("/notes/a.md")).await.unwrap();
        repo.record(Path::new("/notes/b.md")).await.unwrap();
        repo.record(Path::new("/notes/a.md")).await.unwrap();

        assert_eq!(
            paths(&repo.list().await.unwrap()),
            vec![PathBuf::from("/notes/a.md"), PathBuf::from("/notes/b.md")]
        );
    }

    #[tokio::test]
    async fn test_limit_drops_oldest() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir, 2);

        for name in ["a.md", "b.md", "c.md"] {
            repo.record(&Path::new("/notes").join(name)).await.unwrap();
        }

        assert_eq!(
            paths(&repo.list().await.unwrap()),
            vec![PathBuf::from("/notes/c.md"), PathBuf::from("/notes/b.md")]
        );
    }

    #[tokio::test]
    async fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir, 10);
        repo.record(Path::new("/notes/a.md")).await.unwrap();

        repo.clear().await.unwrap();

        assert!(repo.list().await.unwrap().is_empty());
    }
}
