pub mod config;
pub mod documents;

pub fn handlers() -> impl Fn(tauri::ipc::Invoke<tauri::Wry>) -> bool + Send + Sync + 'static {
    tauri::generate_handler![
        documents::show_open_dialog,
        documents::open_file,
        documents::save_file,
        documents::show_save_dialog,
        documents::export_html,
        documents::has_changes,
        documents::revert_changes,
        documents::open_new_file,
        documents::open_in_folder,
        documents::open_in_default_app,
        documents::list_recent_documents,
        documents::clear_recent_documents,
        config::get_editor_config,
        config::save_editor_config,
    ]
}
