// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Thread-safe [`ItemStore`] adapter over [`Persistence`].

use std::path::Path;
use std::sync::Mutex;

use item_service::{ItemStore, StoreError};
use item_service_domain::{Item, ItemFields, ItemId};
use tracing::error;

use crate::Persistence;
use crate::error::PersistenceError;

/// An [`ItemStore`] backed by a single `SQLite` connection.
///
/// Calls are serialized on the connection, so concurrent per-id reads and
/// writes from the batch processor never interleave inside one statement.
pub struct SqliteItemStore {
    persistence: Mutex<Persistence>,
}

impl SqliteItemStore {
    /// Wraps an existing persistence adapter.
    #[must_use]
    pub const fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Mutex::new(persistence),
        }
    }

    /// Creates a store over a fresh, isolated in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Ok(Self::new(Persistence::new_in_memory()?))
    }

    /// Creates a store over a file database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        Ok(Self::new(Persistence::new_with_file(path)?))
    }

    /// Runs `op` against the locked connection, converting failures into
    /// store errors named after `operation`.
    fn with_persistence<T>(
        &self,
        operation: &str,
        op: impl FnOnce(&mut Persistence) -> Result<T, PersistenceError>,
    ) -> Result<T, StoreError> {
        let result: Result<T, PersistenceError> = self
            .persistence
            .lock()
            .map_err(|_| PersistenceError::ConnectionPoisoned)
            .and_then(|mut guard| op(&mut *guard));

        result.map_err(|err| {
            error!(operation, error = %err, "Item store operation failed");
            err.into_store_error(operation)
        })
    }
}

impl ItemStore for SqliteItemStore {
    fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        self.with_persistence("find_all", Persistence::list_items)
    }

    fn find_all_ids(&self) -> Result<Vec<ItemId>, StoreError> {
        self.with_persistence("find_all_ids", Persistence::list_item_ids)
    }

    fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.with_persistence("find_by_id", |p| p.get_item(id))
    }

    fn create(&self, fields: &ItemFields) -> Result<Item, StoreError> {
        self.with_persistence("create", |p| p.insert_item(fields))
    }

    fn save(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        self.with_persistence("save", |p| p.update_item(item))
    }

    fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        self.with_persistence("delete_by_id", |p| p.delete_item(id))
    }
}
