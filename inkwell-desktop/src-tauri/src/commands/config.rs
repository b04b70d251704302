use inkwell_core::config::EditorConfig;
use tauri::State;

use crate::app::AppState;

/// Returns the editor configuration (file filters, startup behaviour).
#[tauri::command]
pub fn get_editor_config(state: State<'_, AppState>) -> EditorConfig {
    state.config_service.get_config()
}

/// Persists the editor configuration. Takes effect on the next launch.
#[tauri::command]
pub fn save_editor_config(config: EditorConfig, state: State<'_, AppState>) -> Result<(), String> {
    state
        .config_service
        .save(&config)
        .map_err(|e| e.to_string())
}
