mod app;
mod commands;
mod gateway;
mod window_registry;

use std::sync::Arc;

use inkwell_infrastructure::{ConfigService, InkwellPaths};
use tauri::webview::PageLoadEvent;
use tauri::{Manager, WindowEvent};

use crate::app::AppState;

const MAIN_WINDOW_LABEL: &str = "main";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let paths = InkwellPaths::new(None);
    let config_service = match ConfigService::default_location(&paths) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            eprintln!("[Startup] Config directory unavailable, using defaults: {}", e);
            Arc::new(ConfigService::new(std::env::temp_dir().join("inkwell-config.toml")))
        }
    };
    let log_level = config_service.get_config().log_level;

    let _log_guard = match paths.logs_dir() {
        Ok(logs_dir) => match app::logging::init(&log_level, &logs_dir) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("[Startup] Logging disabled: {:#}", e);
                None
            }
        },
        Err(e) => {
            eprintln!("[Startup] Logging disabled: {}", e);
            None
        }
    };
    tracing::info!("[Startup] Inkwell {} starting", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .setup(move |app| {
            let state = app::bootstrap(app.handle(), &paths, config_service)?;
            for label in app.webview_windows().keys() {
                state.windows.register(label);
            }
            app.manage(state);
            Ok(())
        })
        .on_page_load(|webview, payload| {
            let Some(state) = webview.try_state::<AppState>() else {
                return;
            };
            let id = state.windows.register(webview.label());

            if matches!(payload.event(), PageLoadEvent::Finished)
                && webview.label() == MAIN_WINDOW_LABEL
                && state.startup_open.take()
            {
                let controller = Arc::clone(&state.controller);
                tauri::async_runtime::spawn(async move {
                    if let Err(e) = controller.request_open(id).await {
                        tracing::warn!("[Startup] Initial open failed: {}", e);
                    }
                });
            }
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                let Some(state) = window.try_state::<AppState>() else {
                    return;
                };
                if let Some(id) = state.windows.release(window.label()) {
                    let controller = Arc::clone(&state.controller);
                    tauri::async_runtime::spawn(async move {
                        controller.window_closed(id).await;
                    });
                }
            }
        })
        .invoke_handler(commands::handlers())
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
