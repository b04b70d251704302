use std::sync::Arc;

use anyhow::{Context, Result};
use inkwell_application::SessionController;
use inkwell_core::gateway::{DialogGateway, PersistenceGateway, ShellGateway, WindowNotifier};
use inkwell_infrastructure::{
    ConfigService, FsPersistenceGateway, InkwellPaths, TomlRecentDocumentsRepository,
};
use tauri::AppHandle;

use crate::app::AppState;
use crate::app::state::StartupOpen;
use crate::gateway::{OpenerShellGateway, TauriDialogGateway, TauriWindowNotifier};
use crate::window_registry::WindowRegistry;

/// Wires the session controller to the Tauri gateways and on-disk stores.
pub fn bootstrap(
    app: &AppHandle,
    paths: &InkwellPaths,
    config_service: Arc<ConfigService>,
) -> Result<AppState> {
    let config = config_service.get_config();
    let startup_open = StartupOpen::new(config.open_dialog_on_startup);
    let windows = Arc::new(WindowRegistry::new());

    let persistence: Arc<dyn PersistenceGateway> = Arc::new(FsPersistenceGateway::new());
    let dialogs: Arc<dyn DialogGateway> =
        Arc::new(TauriDialogGateway::new(app.clone(), Arc::clone(&windows)));
    let notifier: Arc<dyn WindowNotifier> =
        Arc::new(TauriWindowNotifier::new(app.clone(), Arc::clone(&windows)));
    let shell: Arc<dyn ShellGateway> = Arc::new(OpenerShellGateway::new(app.clone()));

    let recent_documents =
        TomlRecentDocumentsRepository::default_location(paths, config.recent_documents_limit)
            .context("Failed to locate recent documents file")?;
    tracing::info!(
        "[Bootstrap] Recent documents stored at {}",
        recent_documents.path().display()
    );

    let controller = SessionController::new(persistence, dialogs, notifier, config)
        .with_recent_documents(Arc::new(recent_documents))
        .with_shell(shell);

    Ok(AppState {
        controller: Arc::new(controller),
        windows,
        config_service,
        startup_open,
    })
}
