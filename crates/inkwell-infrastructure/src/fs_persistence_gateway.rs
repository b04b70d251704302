//! Filesystem-backed document reads and writes.

use async_trait::async_trait;
use inkwell_core::gateway::PersistenceGateway;
use inkwell_core::{InkwellError, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::fs;

const TEMP_PREFIX: &str = ".inkwell-";
const TEMP_SUFFIX: &str = ".tmp";

/// Reads documents as UTF-8 text and writes them atomically.
///
/// A write lands in a uniquely named temp file beside the real target, is
/// synced, and is then renamed over it, so a failed save leaves the previous
/// contents intact. Symlinks are followed and the existing file's permissions
/// are carried over to the new contents.
#[derive(Debug, Clone, Default)]
pub struct FsPersistenceGateway;

impl FsPersistenceGateway {
    pub fn new() -> Self {
        Self
    }
}

/// The file a write to `path` should replace: the symlink target if `path`
/// is a link, `path` itself if it does not exist yet.
fn resolve_target(path: &Path) -> io::Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(target) => Ok(target),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

fn write_atomically(path: &Path, content: &[u8]) -> io::Result<PathBuf> {
    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let permissions = std::fs::metadata(&target).ok().map(|m| m.permissions());

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)?;
    tmp.write_all(content)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}

#[async_trait]
impl PersistenceGateway for FsPersistenceGateway {
    async fn read(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| InkwellError::read(path, e.to_string()))?;

        let content = String::from_utf8(bytes)
            .map_err(|_| InkwellError::read(path, "file is not valid UTF-8 text"))?;

        tracing::debug!(
            "[FsPersistenceGateway] Read {} bytes from {}",
            content.len(),
            path.display()
        );
        Ok(content)
    }

    async fn write(&self, path: &Path, content: &str) -> Result<()> {
        let owned_path = path.to_path_buf();
        let bytes = content.as_bytes().to_vec();

        let result = tokio::task::spawn_blocking(move || write_atomically(&owned_path, &bytes))
            .await
            .map_err(|e| io::Error::other(e.to_string()))
            .and_then(|result| result);

        match result {
            Ok(target) => {
                tracing::debug!(
                    "[FsPersistenceGateway] Wrote {} bytes to {}",
                    content.len(),
                    target.display()
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    "[FsPersistenceGateway] Write to {} failed: {}",
                    path.display(),
                    e
                );
                Err(InkwellError::write(path, e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.md");
        let gateway = FsPersistenceGateway::new();

        gateway.write(&path, "# A\n\nbody").await.unwrap();

        assert_eq!(gateway.read(&path).await.unwrap(), "# A\n\nbody");
        assert_eq!(entries(temp_dir.path()), vec!["a.md".to_string()]);
    }

    #[tokio::test]
    async fn test_write_replaces_existing_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.md");
        std::fs::write(&path, "old content that is longer").unwrap();

        FsPersistenceGateway::new().write(&path, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_read_failure() {
        let temp_dir = TempDir::new().unwrap();
        let err = FsPersistenceGateway::new()
            .read(&temp_dir.path().join("missing.md"))
            .await
            .unwrap_err();
        assert!(err.is_read_failure());
    }

    #[tokio::test]
    async fn test_read_rejects_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("binary.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = FsPersistenceGateway::new().read(&path).await.unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails_cleanly() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("a.md");

        let err = FsPersistenceGateway::new()
            .write(&path, "# A")
            .await
            .unwrap_err();

        assert!(err.is_write_failure());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.md");
        std::fs::write(&path, "# A").unwrap();

        let err = FsPersistenceGateway::new()
            .write(&temp_dir.path().join("missing").join("b.md"), "# B")
            .await
            .unwrap_err();

        assert!(err.is_write_failure());
        assert_eq!(entries(temp_dir.path()), vec!["a.md".to_string()]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# A");
    }

    #[tokio::test]
    async fn test_concurrent_writes_to_same_path_both_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let path = Arc::new(temp_dir.path().join("shared.md"));
        let gateway = Arc::new(FsPersistenceGateway::new());

        let first = tokio::spawn({
            let (gateway, path) = (Arc::clone(&gateway), Arc::clone(&path));
            async move { gateway.write(&path, "# first").await }
        });
        let second = tokio::spawn({
            let (gateway, path) = (Arc::clone(&gateway), Arc::clone(&path));
            async move { gateway.write(&path, "# second").await }
        });

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let content = std::fs::read_to_string(path.as_ref()).unwrap();
        assert!(content == "# first" || content == "# second");
        assert_eq!(entries(temp_dir.path()), vec!["shared.md".to_string()]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_through_symlink_updates_target() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.md");
        let link = temp_dir.path().join("link.md");
        std::fs::write(&target, "# old").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        FsPersistenceGateway::new().write(&link, "# new").await.unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# new");
        assert_eq!(std::fs::read_to_string(&link).unwrap(), "# new");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_write_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("private.md");
        std::fs::write(&path, "# secret").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        FsPersistenceGateway::new().write(&path, "# still secret").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# still secret");
    }
}
