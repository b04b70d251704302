//! Tauri-backed implementations of the core gateway traits.

mod dialog;
mod notifier;
mod shell;

pub use dialog::TauriDialogGateway;
pub use notifier::TauriWindowNotifier;
pub use shell::OpenerShellGateway;
