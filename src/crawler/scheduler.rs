//! Bounded dispatch of crawl invocations
//!
//! Crawls are spawned onto the Tokio runtime immediately; each one then
//! waits for a permit, so at most `max-concurrent-crawls` run at once.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Fire-and-forget task dispatcher with a global concurrency limit
#[derive(Debug, Clone)]
pub struct Scheduler {
    permits: Arc<Semaphore>,
}

impl Scheduler {
    /// Creates a scheduler allowing `max_concurrent` tasks to run at once
    pub fn new(max_concurrent: u32) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1) as usize)),
        }
    }

    /// Spawns `task` without waiting for it
    ///
    /// The returned handle may be dropped; the task keeps running. Must be
    /// called from within a Tokio runtime.
    pub fn dispatch<F>(&self, task: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        tokio::spawn(async move {
            // The semaphore is never closed, so acquiring only waits
            let _permit = permits.acquire_owned().await.ok();
            task.await
        })
    }
}
