//! Application layer for Inkwell.
//!
//! Coordinates the document session store with the persistence, dialog,
//! notification and shell gateways.

pub mod session;

pub use session::{SessionController, WindowLocks};
