//! Document session controller.
//!
//! `SessionController` owns the [`SessionStore`] and runs every file flow a
//! window can trigger: open, save, save-as, export, revert, new document and
//! the shell hand-offs. Outcomes are pushed to the originating window through
//! the [`WindowNotifier`].

use inkwell_core::config::EditorConfig;
use inkwell_core::gateway::{
    DialogGateway, OpenDialogRequest, PersistenceGateway, RecentDocument, RecentDocuments,
    SaveDialogRequest, ShellGateway, WindowNotifier,
};
use inkwell_core::{
    DocumentSession, InkwellError, OpenOutcome, Result, SaveOutcome, SessionStore, WindowId,
    WindowNotification,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::window_locks::WindowLocks;

const OPEN_DIALOG_TITLE: &str = "Open Markdown File";
const SAVE_DIALOG_TITLE: &str = "Save Markdown File";
const EXPORT_DIALOG_TITLE: &str = "Export HTML";

/// Orchestrates document sessions for every open window.
///
/// # Ordering
///
/// Each public operation holds its window's lock from start to finish, so a
/// dirty check issued while a save is in flight answers against the post-save
/// baseline. The store lock is only held for synchronous sections, never
/// across dialog or file I/O, so windows interleave freely.
///
/// # Dirty state
///
/// Nothing caches whether a window has unsaved changes. [`Self::is_dirty`]
/// compares the candidate content against the persisted baseline each time.
pub struct SessionController {
    store: RwLock<SessionStore>,
    window_locks: WindowLocks,
    persistence: Arc<dyn PersistenceGateway>,
    dialogs: Arc<dyn DialogGateway>,
    notifier: Arc<dyn WindowNotifier>,
    recent_documents: Option<Arc<dyn RecentDocuments>>,
    shell: Option<Arc<dyn ShellGateway>>,
    config: EditorConfig,
}

impl SessionController {
    /// Creates a controller with an empty store.
    ///
    /// # Arguments
    ///
    /// * `persistence` - Reads and writes document content
    /// * `dialogs` - Native open/save pickers
    /// * `notifier` - Push channel towards windows
    /// * `config` - Dialog filters and default names
    pub fn new(
        persistence: Arc<dyn PersistenceGateway>,
        dialogs: Arc<dyn DialogGateway>,
        notifier: Arc<dyn WindowNotifier>,
        config: EditorConfig,
    ) -> Self {
        Self {
            store: RwLock::new(SessionStore::new()),
            window_locks: WindowLocks::new(),
            persistence,
            dialogs,
            notifier,
            recent_documents: None,
            shell: None,
            config,
        }
    }

    /// Records successfully opened and saved paths in `recent_documents`.
    pub fn with_recent_documents(mut self, recent_documents: Arc<dyn RecentDocuments>) -> Self {
        self.recent_documents = Some(recent_documents);
        self
    }

    /// Enables [`Self::show_in_folder`] and [`Self::open_in_default_app`].
    pub fn with_shell(mut self, shell: Arc<dyn ShellGateway>) -> Self {
        self.shell = Some(shell);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ============================================================================
    // Open
    // ============================================================================

    /// Reads `path` and makes it the window's document.
    ///
    /// On success the window's session is replaced wholesale and the window
    /// receives `file-opened`. On failure the window receives
    /// `open-file-error`, the error is returned, and any existing session is
    /// left untouched.
    pub async fn open_document(&self, window: WindowId, path: &Path) -> Result<()> {
        let _guard = self.window_locks.acquire(window).await;
        self.open_locked(window, path).await
    }

    /// Asks the user for a markdown file and opens it.
    ///
    /// A dismissed dialog yields `OpenOutcome::Cancelled` and an
    /// `open-file-cancelled` notification; the session is not touched.
    pub async fn request_open(&self, window: WindowId) -> Result<OpenOutcome> {
        let _guard = self.window_locks.acquire(window).await;

        let request = OpenDialogRequest {
            title: OPEN_DIALOG_TITLE.to_string(),
            filters: vec![self.config.documents.clone()],
        };
        let Some(path) = self.dialogs.choose_open_path(window, &request).await else {
            tracing::debug!("[SessionController] Open dialog cancelled for window {}", window);
            self.notifier
                .notify(window, WindowNotification::OpenFileCancelled)
                .await;
            return Ok(OpenOutcome::Cancelled);
        };

        self.open_locked(window, &path).await?;
        Ok(OpenOutcome::Opened(path))
    }

    async fn open_locked(&self, window: WindowId, path: &Path) -> Result<()> {
        tracing::info!(
            "[SessionController] Opening {} in window {}",
            path.display(),
            window
        );

        let content = match self.persistence.read(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    "[SessionController] Failed to open {} in window {}: {}",
                    path.display(),
                    window,
                    e
                );
                self.notifier
                    .notify(
                        window,
                        WindowNotification::OpenFileError {
                            path: path.to_path_buf(),
                            error: e.to_string(),
                        },
                    )
                    .await;
                return Err(e);
            }
        };

        self.store
            .write()
            .await
            .replace(window, DocumentSession::persisted(path, content.clone()));

        self.record_recent(path).await;
        self.notifier
            .notify(
                window,
                WindowNotification::FileOpened {
                    content,
                    path: path.to_path_buf(),
                },
            )
            .await;
        Ok(())
    }

    // ============================================================================
    // Dirty state
    // ============================================================================

    /// Whether `candidate` holds unsaved changes for `window`.
    ///
    /// Without a session, any non-empty content is unsaved. With one, the
    /// content must match the persisted baseline byte-for-byte.
    pub async fn is_dirty(&self, window: WindowId, candidate: &str) -> bool {
        let _guard = self.window_locks.acquire(window).await;
        self.store.read().await.is_dirty(window, candidate)
    }

    /// [`Self::is_dirty`] plus a `document-edited` push so presentation
    /// layers can refresh the window's edited indicator, menus and buttons.
    pub async fn has_changes(&self, window: WindowId, candidate: &str) -> bool {
        let _guard = self.window_locks.acquire(window).await;
        let edited = self.store.read().await.is_dirty(window, candidate);
        self.document_edited(window, edited).await;
        edited
    }

    async fn document_edited(&self, window: WindowId, edited: bool) {
        let title = self.store.read().await.display_name(window);
        self.notifier
            .notify(window, WindowNotification::DocumentEdited { edited, title })
            .await;
    }

    // ============================================================================
    // Save / export
    // ============================================================================

    /// Saves `content` for `window`.
    ///
    /// The destination is the session's path unless the window has none or
    /// `force_choose_destination` is set, in which case the save dialog picks
    /// it. Content equal to the baseline is a silent no-op unless a
    /// destination is being forced.
    ///
    /// Write failures are pushed as `save-file-error` and leave the session
    /// exactly as it was, so the content still reports as unsaved.
    pub async fn save_current(
        &self,
        window: WindowId,
        content: &str,
        force_choose_destination: bool,
    ) -> SaveOutcome {
        let _guard = self.window_locks.acquire(window).await;

        let session = self.store.read().await.get(window).cloned();

        if !force_choose_destination
            && let Some(session) = &session
            && !session.is_dirty(content)
        {
            tracing::debug!(
                "[SessionController] Window {} has no changes, skipping save",
                window
            );
            return SaveOutcome::Unchanged;
        }

        let known_path = session.and_then(|s| s.associated_path);
        let path = match known_path {
            Some(path) if !force_choose_destination => path,
            existing => {
                let request = SaveDialogRequest {
                    title: SAVE_DIALOG_TITLE.to_string(),
                    default_path: existing
                        .unwrap_or_else(|| PathBuf::from(&self.config.untitled_name)),
                    filters: vec![self.config.documents.clone()],
                };
                match self.dialogs.choose_save_path(window, &request).await {
                    Some(path) => self.config.documents.with_default_extension(path),
                    None => return self.save_cancelled(window).await,
                }
            }
        };

        tracing::info!(
            "[SessionController] Saving window {} to {}",
            window,
            path.display()
        );

        if let Err(e) = self.persistence.write(&path, content).await {
            return self.save_failed(window, e).await;
        }

        self.store
            .write()
            .await
            .record_save(window, path.clone(), content.to_string());

        self.record_recent(&path).await;
        self.notifier
            .notify(window, WindowNotification::FileSaved { path: path.clone() })
            .await;
        self.document_edited(window, false).await;
        SaveOutcome::Saved(path)
    }

    /// Writes rendered markup to a destination chosen through the export
    /// dialog.
    ///
    /// Export is always a "save as" with the export filter and never touches
    /// the window's document session.
    pub async fn export_rendered(&self, window: WindowId, rendered_markup: &str) -> SaveOutcome {
        let _guard = self.window_locks.acquire(window).await;

        let document_path = self
            .store
            .read()
            .await
            .get(window)
            .and_then(|s| s.associated_path.clone());
        let file_name = self.config.export_file_name(document_path.as_deref());
        let default_path = match document_path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(file_name),
            None => file_name,
        };

        let request = SaveDialogRequest {
            title: EXPORT_DIALOG_TITLE.to_string(),
            default_path,
            filters: vec![self.config.export.clone()],
        };
        let Some(path) = self.dialogs.choose_save_path(window, &request).await else {
            return self.save_cancelled(window).await;
        };
        let path = self.config.export.with_default_extension(path);

        tracing::info!(
            "[SessionController] Exporting window {} to {}",
            window,
            path.display()
        );

        match self.persistence.write(&path, rendered_markup).await {
            Ok(()) => {
                self.notifier
                    .notify(window, WindowNotification::FileSaved { path: path.clone() })
                    .await;
                SaveOutcome::Saved(path)
            }
            Err(e) => self.save_failed(window, e).await,
        }
    }

    async fn save_cancelled(&self, window: WindowId) -> SaveOutcome {
        tracing::debug!("[SessionController] Save dialog cancelled for window {}", window);
        self.notifier
            .notify(window, WindowNotification::SaveFileCancelled)
            .await;
        SaveOutcome::Cancelled
    }

    async fn save_failed(&self, window: WindowId, error: InkwellError) -> SaveOutcome {
        tracing::warn!(
            "[SessionController] Save failed for window {}: {}",
            window,
            error
        );
        let message = error.to_string();
        self.notifier
            .notify(
                window,
                WindowNotification::SaveFileError {
                    error: message.clone(),
                },
            )
            .await;
        SaveOutcome::Failed(message)
    }

    // ============================================================================
    // New / revert / close
    // ============================================================================

    /// Resets the window to an untitled, empty document.
    ///
    /// Never asks about unsaved changes; callers confirm beforehand if they
    /// want to.
    pub async fn new_document(&self, window: WindowId) {
        let _guard = self.window_locks.acquire(window).await;
        tracing::info!("[SessionController] New document in window {}", window);
        self.store.write().await.reset_to_untitled(window);
        self.document_edited(window, false).await;
    }

    /// The content the editor should go back to: the persisted baseline, or
    /// an empty string when the window has no session.
    pub async fn revert(&self, window: WindowId) -> String {
        let _guard = self.window_locks.acquire(window).await;
        self.store.read().await.baseline(window)
    }

    /// Forgets everything about a destroyed window.
    pub async fn window_closed(&self, window: WindowId) {
        {
            let _guard = self.window_locks.acquire(window).await;
            if self.store.write().await.remove(window).is_some() {
                tracing::debug!("[SessionController] Dropped session of window {}", window);
            }
        }
        self.window_locks.forget(window).await;
    }

    // ============================================================================
    // Shell hand-offs
    // ============================================================================

    /// Reveals the window's document in the platform file manager.
    pub async fn show_in_folder(&self, window: WindowId) -> Result<()> {
        let _guard = self.window_locks.acquire(window).await;
        let path = self.require_path(window).await?;
        self.shell()?.show_in_folder(&path).await
    }

    /// Opens the window's document with the system's default application.
    pub async fn open_in_default_app(&self, window: WindowId) -> Result<()> {
        let _guard = self.window_locks.acquire(window).await;
        let path = self.require_path(window).await?;
        self.shell()?.open_in_default_app(&path).await
    }

    async fn require_path(&self, window: WindowId) -> Result<PathBuf> {
        self.store
            .read()
            .await
            .get(window)
            .and_then(|session| session.associated_path.clone())
            .ok_or(InkwellError::NoAssociatedFile { window })
    }

    fn shell(&self) -> Result<&Arc<dyn ShellGateway>> {
        self.shell
            .as_ref()
            .ok_or_else(|| InkwellError::shell("no shell integration configured"))
    }

    // ============================================================================
    // Queries
    // ============================================================================

    /// Snapshot of the window's session.
    pub async fn session(&self, window: WindowId) -> Option<DocumentSession> {
        let _guard = self.window_locks.acquire(window).await;
        self.store.read().await.get(window).cloned()
    }

    pub async fn associated_path(&self, window: WindowId) -> Option<PathBuf> {
        self.session(window).await.and_then(|s| s.associated_path)
    }

    /// Number of windows currently holding a session.
    pub async fn session_count(&self) -> usize {
        self.store.read().await.len()
    }

    /// Recent documents, most recent first. Empty when no list is configured.
    pub async fn recent_documents(&self) -> Result<Vec<RecentDocument>> {
        match &self.recent_documents {
            Some(recent) => recent.list().await,
            None => Ok(Vec::new()),
        }
    }

    /// Empties the recent documents list.
    pub async fn clear_recent_documents(&self) -> Result<()> {
        match &self.recent_documents {
            Some(recent) => {
                tracing::info!("[SessionController] Clearing recent documents");
                recent.clear().await
            }
            None => Ok(()),
        }
    }

    async fn record_recent(&self, path: &Path) {
        if let Some(recent) = &self.recent_documents
            && let Err(e) = recent.record(path).await
        {
            tracing::warn!(
                "[SessionController] Failed to record recent document {}: {}",
                path.display(),
                e
            );
        }
    }
}
