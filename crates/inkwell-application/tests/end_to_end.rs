//! Controller flows against the real filesystem gateway.

use async_trait::async_trait;
use inkwell_application::SessionController;
use inkwell_core::config::EditorConfig;
use inkwell_core::gateway::{
    DialogGateway, OpenDialogRequest, RecentDocuments, SaveDialogRequest, WindowNotifier,
};
use inkwell_core::{SaveOutcome, WindowId, WindowNotification};
use inkwell_infrastructure::{FsPersistenceGateway, TomlRecentDocumentsRepository};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Answers every dialog with the same path.
struct FixedDialogs {
    answer: Mutex<Option<PathBuf>>,
}

#[async_trait]
impl DialogGateway for FixedDialogs {
    async fn choose_open_path(&self, _: WindowId, _: &OpenDialogRequest) -> Option<PathBuf> {
        self.answer.lock().unwrap().clone()
    }

    async fn choose_save_path(&self, _: WindowId, _: &SaveDialogRequest) -> Option<PathBuf> {
        self.answer.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct Inbox {
    received: Mutex<Vec<WindowNotification>>,
}

#[async_trait]
impl WindowNotifier for Inbox {
    async fn notify(&self, _: WindowId, notification: WindowNotification) {
        self.received.lock().unwrap().push(notification);
    }
}

struct Harness {
    _temp_dir: TempDir,
    docs: PathBuf,
    controller: SessionController,
    dialogs: Arc<FixedDialogs>,
    inbox: Arc<Inbox>,
    recent: Arc<TomlRecentDocumentsRepository>,
}

fn harness() -> Harness {
    let temp_dir = TempDir::new().unwrap();
    let docs = temp_dir.path().join("docs");
    std::fs::create_dir_all(&docs).unwrap();

    let dialogs = Arc::new(FixedDialogs {
        answer: Mutex::new(None),
    });
    let inbox = Arc::new(Inbox::default());
    let recent = Arc::new(TomlRecentDocumentsRepository::new(
        temp_dir.path().join("recent.toml"),
        10,
    ));
    let controller = SessionController::new(
        Arc::new(FsPersistenceGateway::new()),
        dialogs.clone(),
        inbox.clone(),
        EditorConfig::default(),
    )
    .with_recent_documents(recent.clone());

    Harness {
        _temp_dir: temp_dir,
        docs,
        controller,
        dialogs,
        inbox,
        recent,
    }
}

#[tokio::test]
async fn open_edit_save_round_trip_on_disk() {
    let h = harness();
    let window = WindowId::allocate();
    let path = h.docs.join("a.md");
    std::fs::write(&path, "# A").unwrap();

    h.controller.open_document(window, &path).await.unwrap();
    assert!(h.controller.is_dirty(window, "# A!").await);

    let outcome = h.controller.save_current(window, "# A!", false).await;

    assert_eq!(outcome, SaveOutcome::Saved(path.clone()));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# A!");
    assert!(!h.controller.is_dirty(window, "# A!").await);

    let recent = h.recent.list().await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].path, path);
}

#[tokio::test]
async fn save_as_untitled_then_failed_overwrite_keeps_disk_and_baseline() {
    let h = harness();
    let window = WindowId::allocate();
    let path = h.docs.join("new.md");
    *h.dialogs.answer.lock().unwrap() = Some(path.clone());

    let outcome = h.controller.save_current(window, "draft", false).await;
    assert_eq!(outcome, SaveOutcome::Saved(path.clone()));

    // Saving into a directory that does not exist must fail without losing
    // the already-saved document.
    let unwritable = h.docs.join("missing-dir").join("new.md");
    *h.dialogs.answer.lock().unwrap() = Some(unwritable);

    let outcome = h.controller.save_current(window, "draft v2", true).await;

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "draft");
    assert_eq!(h.controller.associated_path(window).await, Some(path));
    assert!(h.controller.is_dirty(window, "draft v2").await);
    assert!(!h.controller.is_dirty(window, "draft").await);
    assert!(
        h.inbox
            .received
            .lock()
            .unwrap()
            .iter()
            .any(|n| matches!(n, WindowNotification::SaveFileError { .. }))
    );
}

#[tokio::test]
async fn export_writes_markup_beside_document() {
    let h = harness();
    let window = WindowId::allocate();
    let doc = h.docs.join("notes.md");
    std::fs::write(&doc, "# Notes").unwrap();
    h.controller.open_document(window, &doc).await.unwrap();

    let html = h.docs.join("notes.html");
    *h.dialogs.answer.lock().unwrap() = Some(html.clone());

    let outcome = h
        .controller
        .export_rendered(window, "<h1>Notes</h1>")
        .await;

    assert_eq!(outcome, SaveOutcome::Saved(html.clone()));
    assert_eq!(std::fs::read_to_string(&html).unwrap(), "<h1>Notes</h1>");
    assert_eq!(h.controller.associated_path(window).await, Some(doc));
}
