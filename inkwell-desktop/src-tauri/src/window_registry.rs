//! Maps Tauri window labels to document window ids.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use inkwell_core::WindowId;

#[derive(Default)]
struct Entries {
    by_label: HashMap<String, WindowId>,
    by_id: HashMap<WindowId, String>,
}

/// Ids are allocated when a webview window is created and released when it
/// is destroyed. Commands only look ids up, so a request arriving from a
/// window that is already gone cannot register it again. A label reused by a
/// later window gets a fresh id.
#[derive(Default)]
pub struct WindowRegistry {
    entries: Mutex<Entries>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a newly created window. Idempotent while the window lives,
    /// so page reloads keep their id.
    pub fn register(&self, label: &str) -> WindowId {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = entries.by_label.get(label) {
            return *id;
        }

        let id = WindowId::allocate();
        entries.by_label.insert(label.to_string(), id);
        entries.by_id.insert(id, label.to_string());
        tracing::debug!("[WindowRegistry] Window '{}' registered as {}", label, id);
        id
    }

    /// The id of the live window with `label`.
    pub fn id_for(&self, label: &str) -> Option<WindowId> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.by_label.get(label).copied()
    }

    pub fn label_for(&self, id: WindowId) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.by_id.get(&id).cloned()
    }

    /// Forgets a destroyed window, returning the id it had.
    pub fn release(&self, label: &str) -> Option<WindowId> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let id = entries.by_label.remove(label)?;
        entries.by_id.remove(&id);
        tracing::debug!("[WindowRegistry] Window '{}' ({}) released", label, id);
        Some(id)
    }
}
