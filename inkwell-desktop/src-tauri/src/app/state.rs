use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use inkwell_application::SessionController;
use inkwell_core::WindowId;
use inkwell_infrastructure::ConfigService;
use tauri::WebviewWindow;

use crate::window_registry::WindowRegistry;

/// Application state shared across Tauri commands.
pub struct AppState {
    pub controller: Arc<SessionController>,
    pub windows: Arc<WindowRegistry>,
    pub config_service: Arc<ConfigService>,
    pub startup_open: StartupOpen,
}

impl AppState {
    /// Resolves the id of the window that invoked a command.
    ///
    /// Fails for windows that were never registered or are already
    /// destroyed.
    pub fn window_id(&self, window: &WebviewWindow) -> Result<WindowId, String> {
        self.windows
            .id_for(window.label())
            .ok_or_else(|| format!("Window '{}' is not open", window.label()))
    }
}

/// One-shot trigger for the open dialog shown at startup.
pub struct StartupOpen(AtomicBool);

impl StartupOpen {
    pub fn new(enabled: bool) -> Self {
        Self(AtomicBool::new(enabled))
    }

    /// True on the first call when enabled, false ever after.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}
