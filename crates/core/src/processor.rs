// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent batch status processing.
//!
//! A run reads the id snapshot once, then dispatches one unit of work per id
//! onto a worker pool bounded by a semaphore. Each unit marks its item as
//! processed and saves it. The run resolves only after every unit has
//! finished, and any unit failure fails the run.
//!
//! Units are spawned as independent tasks. Dropping the future returned by
//! [`BatchProcessor::process_all`] detaches them; they still finish their
//! writes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use item_service_domain::{Item, ItemId};
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::ProcessingError;
use crate::store::ItemStore;

/// Default number of concurrently executing units.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Configuration for a [`BatchProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    pool_size: usize,
    unit_delay: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            unit_delay: Duration::ZERO,
        }
    }
}

impl ProcessorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the worker pool size.
    ///
    /// Values are clamped to `1..=Semaphore::MAX_PERMITS`.
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Sets a fixed delay each unit waits, inside its pool slot, before
    /// touching the store.
    #[must_use]
    pub const fn with_unit_delay(mut self, unit_delay: Duration) -> Self {
        self.unit_delay = unit_delay;
        self
    }

    /// Returns the worker pool size.
    #[must_use]
    pub const fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Returns the per-unit delay.
    #[must_use]
    pub const fn unit_delay(&self) -> Duration {
        self.unit_delay
    }
}

/// Accumulator for a single run.
///
/// Created fresh by every [`BatchProcessor::process_all`] call.
#[derive(Debug, Default)]
struct BatchRun {
    items: Mutex<Vec<Item>>,
    processed: AtomicUsize,
    skipped: AtomicUsize,
}

impl BatchRun {
    async fn record_processed(&self, item: Item) {
        self.items.lock().await.push(item);
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    fn processed(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }

    async fn take_items(&self) -> Vec<Item> {
        std::mem::take(&mut *self.items.lock().await)
    }
}

/// Transitions every stored item to the processed status, concurrently.
pub struct BatchProcessor<S: ItemStore> {
    store: Arc<S>,
    config: ProcessorConfig,
}

impl<S: ItemStore> Clone for BatchProcessor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: ItemStore> BatchProcessor<S> {
    /// Creates a processor over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, config: ProcessorConfig) -> Self {
        Self { store, config }
    }

    /// Processes every item present in the store at call time.
    ///
    /// Items deleted before their unit runs are skipped. Items created after
    /// the snapshot is taken are not processed.
    ///
    /// # Returns
    ///
    /// One entry per item that was found and saved, in completion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read, or if any unit of
    /// work fails or panics. When several units fail, the error for the
    /// earliest id in the snapshot is returned; all failures are logged.
    pub async fn process_all(&self) -> Result<Vec<Item>, ProcessingError> {
        let snapshot: Vec<ItemId> = self
            .store
            .find_all_ids()
            .map_err(ProcessingError::Snapshot)?;

        info!(
            snapshot_size = snapshot.len(),
            pool_size = self.config.pool_size,
            "Starting batch processing"
        );

        let run: Arc<BatchRun> = Arc::new(BatchRun::default());
        let pool: Arc<Semaphore> = Arc::new(Semaphore::new(self.config.pool_size));

        let handles: Vec<(ItemId, JoinHandle<Result<(), ProcessingError>>)> = snapshot
            .into_iter()
            .map(|item_id| {
                let handle = tokio::spawn(run_unit(
                    Arc::clone(&self.store),
                    Arc::clone(&pool),
                    Arc::clone(&run),
                    item_id,
                    self.config.unit_delay,
                ));
                (item_id, handle)
            })
            .collect();

        let outcomes = join_all(
            handles
                .into_iter()
                .map(|(item_id, handle)| async move { (item_id, handle.await) }),
        )
        .await;

        let mut first_failure: Option<ProcessingError> = None;
        let mut failed: usize = 0;
        for (item_id, outcome) in outcomes {
            let result: Result<(), ProcessingError> = match outcome {
                Ok(result) => result,
                Err(join_err) => Err(ProcessingError::from_join(item_id, join_err)),
            };
            if let Err(err) = result {
                error!(item_id = %item_id, error = %err, "Batch unit failed");
                failed += 1;
                first_failure.get_or_insert(err);
            }
        }

        if let Some(err) = first_failure {
            error!(
                failed,
                processed = run.processed(),
                skipped = run.skipped(),
                "Batch processing failed"
            );
            return Err(err);
        }

        let items: Vec<Item> = run.take_items().await;
        info!(
            processed = run.processed(),
            skipped = run.skipped(),
            "Batch processing complete"
        );
        Ok(items)
    }
}

/// Runs the unit of work for one id inside a pool slot.
async fn run_unit<S: ItemStore>(
    store: Arc<S>,
    pool: Arc<Semaphore>,
    run: Arc<BatchRun>,
    item_id: ItemId,
    unit_delay: Duration,
) -> Result<(), ProcessingError> {
    // The pool is never closed during a run; a failed acquire means the unit
    // could not be scheduled.
    let _permit = pool
        .acquire_owned()
        .await
        .map_err(|_| ProcessingError::WorkerCancelled { item_id })?;

    if !unit_delay.is_zero() {
        tokio::time::sleep(unit_delay).await;
    }

    let outcome: Result<Option<Item>, ProcessingError> =
        tokio::task::spawn_blocking(move || process_item(store.as_ref(), item_id))
            .await
            .map_err(|err| ProcessingError::from_join(item_id, err))?;

    match outcome? {
        Some(item) => {
            debug!(item_id = %item_id, "Processed item");
            run.record_processed(item).await;
        }
        None => {
            warn!(item_id = %item_id, "Item disappeared before processing, skipping");
            run.record_skipped();
        }
    }

    Ok(())
}

/// Marks a single item as processed and saves it.
///
/// Returns `Ok(None)` if the item no longer exists at lookup or save time.
fn process_item<S: ItemStore + ?Sized>(
    store: &S,
    item_id: ItemId,
) -> Result<Option<Item>, ProcessingError> {
    let store_err = |source| ProcessingError::Store { item_id, source };

    let Some(mut item) = store.find_by_id(item_id).map_err(store_err)? else {
        return Ok(None);
    };

    item.mark_processed();
    store.save(&item).map_err(store_err)
}
