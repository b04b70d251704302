//! Document session use cases.
//!
//! - `controller`: open / save / save-as / export / revert / new-document flows
//! - `window_locks`: per-window serialization of those flows

mod controller;
mod window_locks;


pub use controller::SessionController;
pub use window_locks::WindowLocks;
