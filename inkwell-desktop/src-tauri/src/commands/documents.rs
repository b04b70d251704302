//! Document intents sent by a window's UI.
//!
//! Each command resolves the invoking webview to its `WindowId` and forwards
//! to the session controller. Outcomes the UI must react to are also pushed
//! as window events, so the return values are informational.

use std::path::PathBuf;

use inkwell_core::gateway::RecentDocument;
use inkwell_core::{OpenOutcome, SaveOutcome};
use tauri::{State, WebviewWindow};

use crate::app::AppState;

/// Shows the open dialog and loads the chosen markdown file.
#[tauri::command]
pub async fn show_open_dialog(
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<OpenOutcome, String> {
    let id = state.window_id(&window)?;
    state
        .controller
        .request_open(id)
        .await
        .map_err(|e| e.to_string())
}

/// Opens a known path (e.g. from the recent documents list).
#[tauri::command]
pub async fn open_file(
    path: String,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let id = state.window_id(&window)?;
    state
        .controller
        .open_document(id, &PathBuf::from(path))
        .await
        .map_err(|e| e.to_string())
}

/// Saves to the associated file, asking for a destination if there is none.
#[tauri::command]
pub async fn save_file(
    content: String,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<SaveOutcome, String> {
    let id = state.window_id(&window)?;
    Ok(state.controller.save_current(id, &content, false).await)
}

/// Save As: always asks for a destination.
#[tauri::command]
pub async fn show_save_dialog(
    content: String,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<SaveOutcome, String> {
    let id = state.window_id(&window)?;
    Ok(state.controller.save_current(id, &content, true).await)
}

/// Writes the rendered HTML to a user-chosen file.
#[tauri::command]
pub async fn export_html(
    markup: String,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<SaveOutcome, String> {
    let id = state.window_id(&window)?;
    Ok(state.controller.export_rendered(id, &markup).await)
}

#[tauri::command]
pub async fn has_changes(
    content: String,
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<bool, String> {
    let id = state.window_id(&window)?;
    Ok(state.controller.has_changes(id, &content).await)
}

/// Returns the last saved content so the editor can discard its edits.
#[tauri::command]
pub async fn revert_changes(
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<String, String> {
    let id = state.window_id(&window)?;
    Ok(state.controller.revert(id).await)
}

#[tauri::command]
pub async fn open_new_file(
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let id = state.window_id(&window)?;
    state.controller.new_document(id).await;
    Ok(())
}

#[tauri::command]
pub async fn open_in_folder(
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let id = state.window_id(&window)?;
    state
        .controller
        .show_in_folder(id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn open_in_default_app(
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<(), String> {
    let id = state.window_id(&window)?;
    state
        .controller
        .open_in_default_app(id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_recent_documents(state: State<'_, AppState>) -> Result<(), String> {
    state
        .controller
        .clear_recent_documents()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_recent_documents(
    state: State<'_, AppState>,
) -> Result<Vec<RecentDocument>, String> {
    state
        .controller
        .recent_documents()
        .await
        .map_err(|e| e.to_string())
}
