use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use inkwell_core::gateway::WindowNotifier;
use inkwell_core::{WindowId, WindowNotification};
use tauri::{AppHandle, Emitter, EventTarget, Manager};

use crate::window_registry::WindowRegistry;

const APP_NAME: &str = "Inkwell";

/// Emits notifications as Tauri events addressed to a single webview window.
///
/// Title changes are applied here as well, so the window chrome tracks the
/// document without a round trip through the frontend.
pub struct TauriWindowNotifier {
    app: AppHandle,
    windows: Arc<WindowRegistry>,
}

impl TauriWindowNotifier {
    pub fn new(app: AppHandle, windows: Arc<WindowRegistry>) -> Self {
        Self { app, windows }
    }

    fn set_title(&self, label: &str, title: &str, edited: bool) {
        let Some(window) = self.app.get_webview_window(label) else {
            return;
        };
        let marker = if edited { " \u{2022}" } else { "" };
        if let Err(e) = window.set_title(&format!("{}{} - {}", title, marker, APP_NAME)) {
            tracing::warn!("[TauriWindowNotifier] Failed to set title of '{}': {}", label, e);
        }
    }
}

fn file_title(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[async_trait]
impl WindowNotifier for TauriWindowNotifier {
    async fn notify(&self, window: WindowId, notification: WindowNotification) {
        let Some(label) = self.windows.label_for(window) else {
            tracing::debug!(
                "[TauriWindowNotifier] Dropping {} for closed window {}",
                notification.event_name(),
                window
            );
            return;
        };

        match &notification {
            WindowNotification::FileOpened { path, .. } => {
                self.set_title(&label, &file_title(path), false);
            }
            WindowNotification::DocumentEdited { edited, title } => {
                self.set_title(&label, title, *edited);
            }
            _ => {}
        }

        let event = notification.event_name();
        if let Err(e) = self
            .app
            .emit_to(EventTarget::webview_window(&label), event, &notification)
        {
            tracing::warn!(
                "[TauriWindowNotifier] Failed to emit {} to '{}': {}",
                event,
                label,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_title_uses_file_name() {
        assert_eq!(file_title(Path::new("/notes/todo.md")), "todo.md");
        assert_eq!(file_title(Path::new("/")), "/");
    }
}
