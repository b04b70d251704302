pub mod config;
pub mod document;
pub mod error;
pub mod gateway;
pub mod notification;
pub mod outcome;
pub mod window;

// Re-export common types
pub use document::{DocumentSession, SessionStore};
pub use error::{InkwellError, Result};
pub use notification::WindowNotification;
pub use outcome::{OpenOutcome, SaveOutcome};
pub use window::WindowId;
