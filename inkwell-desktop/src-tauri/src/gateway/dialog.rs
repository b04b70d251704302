use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use inkwell_core::WindowId;
use inkwell_core::gateway::{DialogGateway, FileFilter, OpenDialogRequest, SaveDialogRequest};
use inkwell_infrastructure::InkwellPaths;
use tauri::{AppHandle, Manager, Wry};
use tauri_plugin_dialog::{DialogExt, FileDialogBuilder, FilePath};
use tokio::sync::oneshot;

use crate::window_registry::WindowRegistry;

/// Native file pickers via `tauri-plugin-dialog`, parented to the acting window.
pub struct TauriDialogGateway {
    app: AppHandle,
    windows: Arc<WindowRegistry>,
}

impl TauriDialogGateway {
    pub fn new(app: AppHandle, windows: Arc<WindowRegistry>) -> Self {
        Self { app, windows }
    }

    fn builder(&self, window: WindowId, title: &str, filters: &[FileFilter]) -> FileDialogBuilder<Wry> {
        let mut builder = self.app.dialog().file().set_title(title);
        for filter in filters {
            let extensions: Vec<&str> = filter.extensions.iter().map(String::as_str).collect();
            builder = builder.add_filter(&filter.name, &extensions);
        }

        let parent = self
            .windows
            .label_for(window)
            .and_then(|label| self.app.get_webview_window(&label));
        if let Some(parent) = parent {
            builder = builder.set_parent(&parent);
        }
        builder
    }
}

fn into_path(file: Option<FilePath>) -> Option<PathBuf> {
    match file?.into_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("[TauriDialogGateway] Dialog returned a non-file path: {}", e);
            None
        }
    }
}

#[async_trait]
impl DialogGateway for TauriDialogGateway {
    async fn choose_open_path(
        &self,
        window: WindowId,
        request: &OpenDialogRequest,
    ) -> Option<PathBuf> {
        let (tx, rx) = oneshot::channel();

        let mut builder = self.builder(window, &request.title, &request.filters);
        if let Some(dir) = InkwellPaths::default_documents_dir() {
            builder = builder.set_directory(dir);
        }
        builder.pick_file(move |file| {
            let _ = tx.send(into_path(file));
        });

        rx.await.ok().flatten()
    }

    async fn choose_save_path(
        &self,
        window: WindowId,
        request: &SaveDialogRequest,
    ) -> Option<PathBuf> {
        let (tx, rx) = oneshot::channel();

        let mut builder = self.builder(window, &request.title, &request.filters);
        let default_path = &request.default_path;
        match default_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            Some(dir) => builder = builder.set_directory(dir),
            None => {
                if let Some(dir) = InkwellPaths::default_documents_dir() {
                    builder = builder.set_directory(dir);
                }
            }
        }
        if let Some(name) = default_path.file_name() {
            builder = builder.set_file_name(name.to_string_lossy());
        }
        builder.save_file(move |file| {
            let _ = tx.send(into_path(file));
        });

        rx.await.ok().flatten()
    }
}
