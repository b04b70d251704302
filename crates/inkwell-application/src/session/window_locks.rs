use inkwell_core::WindowId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per window.
///
/// Holding a window's guard for the whole of an operation makes operations on
/// that window observe each other in invocation order (tokio's mutex is fair),
/// while different windows never wait on each other.
#[derive(Default)]
pub struct WindowLocks {
    locks: Mutex<HashMap<WindowId, Arc<Mutex<()>>>>,
}

impl WindowLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for every earlier operation on `window` to finish.
    pub async fn acquire(&self, window: WindowId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(window).or_default())
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry of a destroyed window.
    ///
    /// The entry is kept while any operation still holds or waits on it, so
    /// a late operation queues behind those instead of getting a new mutex.
    pub async fn forget(&self, window: WindowId) {
        let mut locks = self.locks.lock().await;
        if locks
            .get(&window)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&window);
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}
