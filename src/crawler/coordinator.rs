//! Crawl coordinator - status bookkeeping around the engine
//!
//! The coordinator owns the `Queued -> Running -> {Completed | Error}`
//! lifecycle of stored URL records:
//! - "start" claims a record (rejecting one that is already running) and
//!   dispatches the crawl without waiting for it
//! - a finished crawl persists its outcome and marks the record completed
//! - a failed crawl stores its error message and marks the record errored
//! - "stop" is advisory: it relabels the record but cannot cancel the
//!   in-flight fetch or probes

use crate::config::Config;
use crate::crawler::engine::{CrawlEngine, CrawlOutcome};
use crate::crawler::scheduler::Scheduler;
use crate::state::CrawlStatus;
use crate::storage::{SqliteStorage, Storage, StorageError, UrlRecord};
use crate::{InspectorError, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// Message attached to a record when a user stops its crawl
pub const STOPPED_MESSAGE: &str = "Crawling stopped by user";

/// Main crawl coordinator
///
/// Cheap to clone; clones share the engine, storage and scheduler.
#[derive(Clone)]
pub struct Coordinator {
    engine: Arc<CrawlEngine>,
    storage: Arc<Mutex<SqliteStorage>>,
    scheduler: Scheduler,
}

impl Coordinator {
    /// Creates a coordinator from configuration and an opened storage
    pub fn new(config: &Config, storage: SqliteStorage) -> Result<Self> {
        let engine = CrawlEngine::new(config)?;
        Ok(Self::with_engine(
            engine,
            storage,
            config.crawler.max_concurrent_crawls,
        ))
    }

    /// Creates a coordinator around an already-built engine
    pub fn with_engine(engine: CrawlEngine, storage: SqliteStorage, max_concurrent: u32) -> Self {
        Self {
            engine: Arc::new(engine),
            storage: Arc::new(Mutex::new(storage)),
            scheduler: Scheduler::new(max_concurrent),
        }
    }

    /// Shared handle to the underlying storage
    pub fn storage(&self) -> Arc<Mutex<SqliteStorage>> {
        Arc::clone(&self.storage)
    }

    /// Registers a new URL in `Queued` status
    pub fn add_url(&self, url: &str) -> Result<i64> {
        let id = self.lock_storage()?.insert_url(url)?;
        tracing::info!("Queued URL {} as #{}", url, id);
        Ok(id)
    }

    /// Looks up a URL record
    pub fn url(&self, id: i64) -> Result<UrlRecord> {
        Ok(self.lock_storage()?.get_url(id)?)
    }

    /// Starts crawling a URL in the background
    ///
    /// Returns as soon as the record is marked `Running`; the crawl itself
    /// runs on the scheduler. Dropping the handle does not cancel it.
    ///
    /// # Errors
    ///
    /// * `InspectorError::Conflict` - the URL is already being crawled
    /// * `InspectorError::Storage` - the URL does not exist or storage failed
    pub fn start(&self, id: i64) -> Result<JoinHandle<()>> {
        self.claim(id)?;

        let coordinator = self.clone();
        Ok(self.scheduler.dispatch(async move {
            if let Err(e) = coordinator.execute(id).await {
                tracing::warn!("Crawl error for URL #{}: {}", id, e);
            }
        }))
    }

    /// Starts several URLs; each id succeeds or fails on its own
    pub fn bulk_start(&self, ids: &[i64]) -> Vec<(i64, Result<JoinHandle<()>>)> {
        let results: Vec<_> = ids.iter().map(|&id| (id, self.start(id))).collect();

        let started = results.iter().filter(|(_, r)| r.is_ok()).count();
        tracing::info!("Started {} of {} crawls", started, ids.len());

        results
    }

    /// Stops a running crawl (advisory)
    ///
    /// The record goes back to `Queued` with an explanatory message. The
    /// in-flight crawl is not interrupted and will still report its result.
    pub fn stop(&self, id: i64) -> Result<()> {
        let mut storage = self.lock_storage()?;
        let record = storage.get_url(id)?;

        if !record.status.can_stop() {
            return Err(InspectorError::Conflict {
                id,
                message: "URL is not currently being crawled".to_string(),
            });
        }

        storage.update_url_status(id, CrawlStatus::Queued, Some(STOPPED_MESSAGE))?;
        tracing::info!("Stopped crawl for URL #{}", id);
        Ok(())
    }

    /// Claims and crawls a URL on the current task, waiting for the result
    pub async fn crawl_now(&self, id: i64) -> Result<CrawlOutcome> {
        self.claim(id)?;
        self.execute(id).await
    }

    /// Moves a record to `Running` unless it already is
    fn claim(&self, id: i64) -> Result<()> {
        let mut storage = self.lock_storage()?;
        let record = storage.get_url(id)?;

        if !record.status.can_transition_to(CrawlStatus::Running) {
            return Err(InspectorError::Conflict {
                id,
                message: "URL crawling is already in progress".to_string(),
            });
        }

        storage.update_url_status(id, CrawlStatus::Running, None)?;
        Ok(())
    }

    /// Runs the engine for a claimed record and reports the result
    async fn execute(&self, id: i64) -> Result<CrawlOutcome> {
        let target = self.lock_storage()?.get_url(id)?.url;

        let crawled = self.engine.run_crawl(&target).await;

        let outcome = match crawled {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Crawl of {} failed: {}", target, e);
                self.lock_storage()?.update_url_status(
                    id,
                    CrawlStatus::Error,
                    Some(&e.to_string()),
                )?;
                return Err(e.into());
            }
        };

        let mut storage = self.lock_storage()?;
        if let Err(e) = storage.save_crawl_outcome(id, &outcome) {
            tracing::warn!("Failed to save results for {}: {}", target, e);
            let message = format!("Failed to save results: {}", e);
            if let Err(status_error) =
                storage.update_url_status(id, CrawlStatus::Error, Some(&message))
            {
                tracing::error!("Failed to record error for URL #{}: {}", id, status_error);
            }
            return Err(e.into());
        }

        storage.update_url_status(id, CrawlStatus::Completed, None)?;
        tracing::info!("Crawl of {} completed", target);

        Ok(outcome)
    }

    fn lock_storage(&self) -> std::result::Result<MutexGuard<'_, SqliteStorage>, StorageError> {
        self.storage.lock().map_err(|_| StorageError::LockPoisoned)
    }
}
