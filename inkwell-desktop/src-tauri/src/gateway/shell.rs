use std::path::Path;

use async_trait::async_trait;
use inkwell_core::gateway::ShellGateway;
use inkwell_core::{InkwellError, Result};
use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;

/// Reveals and opens documents through `tauri-plugin-opener`.
pub struct OpenerShellGateway {
    app: AppHandle,
}

impl OpenerShellGateway {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl ShellGateway for OpenerShellGateway {
    async fn show_in_folder(&self, path: &Path) -> Result<()> {
        tracing::debug!("[OpenerShellGateway] Revealing {}", path.display());
        self.app
            .opener()
            .reveal_item_in_dir(path)
            .map_err(|e| InkwellError::shell(format!("Failed to reveal {}: {}", path.display(), e)))
    }

    async fn open_in_default_app(&self, path: &Path) -> Result<()> {
        tracing::debug!("[OpenerShellGateway] Opening {}", path.display());
        self.app
            .opener()
            .open_path(path.to_string_lossy(), None::<&str>)
            .map_err(|e| InkwellError::shell(format!("Failed to open {}: {}", path.display(), e)))
    }
}
