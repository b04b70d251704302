//! Document session domain module.
//!
//! Tracks, per window, which file (if any) is being edited and the content
//! that was last read from or written to it.
//!
//! # Module Structure
//!
//! - `model`: Per-window document state (`DocumentSession`)
//! - `store`: Window-keyed collection of sessions (`SessionStore`)
//!
//! # Usage
//!
//! ```ignore
//! use inkwell_core::document::{DocumentSession, SessionStore};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{DocumentSession, UNTITLED_DISPLAY_NAME};
pub use store::SessionStore;
