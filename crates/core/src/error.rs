// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use item_service_domain::ItemId;
use thiserror::Error;

/// Errors reported by an [`ItemStore`](crate::ItemStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store cannot currently serve requests.
    Unavailable(String),
    /// A store operation failed.
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Item store unavailable: {msg}"),
            Self::OperationFailed { operation, message } => {
                write!(f, "Item store operation '{operation}' failed: {message}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors that fail a whole batch processing run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessingError {
    /// The id snapshot could not be read.
    #[error("Failed to read item id snapshot: {0}")]
    Snapshot(#[source] StoreError),

    /// The store failed while processing a single item.
    #[error("Failed to process item {item_id}: {source}")]
    Store {
        item_id: ItemId,
        #[source]
        source: StoreError,
    },

    /// The unit of work for an item panicked.
    #[error("Worker processing item {item_id} panicked: {message}")]
    WorkerPanicked { item_id: ItemId, message: String },

    /// The unit of work for an item was cancelled before it finished.
    #[error("Worker processing item {item_id} was cancelled")]
    WorkerCancelled { item_id: ItemId },
}

impl ProcessingError {
    /// Converts a task join failure for `item_id` into a processing error.
    pub(crate) fn from_join(item_id: ItemId, err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            let payload = err.into_panic();
            let message: String = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| String::from("unknown panic payload"));
            Self::WorkerPanicked { item_id, message }
        } else {
            Self::WorkerCancelled { item_id }
        }
    }

    /// Returns the item whose unit of work failed, if the failure is item-scoped.
    #[must_use]
    pub const fn item_id(&self) -> Option<ItemId> {
        match self {
            Self::Snapshot(_) => None,
            Self::Store { item_id, .. }
            | Self::WorkerPanicked { item_id, .. }
            | Self::WorkerCancelled { item_id } => Some(*item_id),
        }
    }
}
