// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use item_service_domain::{Item, ItemFields, ItemId};

/// Durable item storage keyed by store-assigned identifiers.
///
/// Implementations must be safe to call from many threads at once; the
/// batch processor issues per-id reads and writes concurrently from its
/// worker pool. Calls are synchronous and may block.
pub trait ItemStore: Send + Sync + 'static {
    /// Returns every stored item.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_all(&self) -> Result<Vec<Item>, StoreError>;

    /// Returns the identifiers of every stored item.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_all_ids(&self) -> Result<Vec<ItemId>, StoreError>;

    /// Returns the item with the given identifier, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Stores a new item and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the item cannot be written.
    fn create(&self, fields: &ItemFields) -> Result<Item, StoreError>;

    /// Persists the fields of an existing item.
    ///
    /// Returns `Ok(None)` when no item with `item.id` exists. A missing item
    /// is never recreated.
    ///
    /// # Errors
    ///
    /// Returns an error if the item cannot be written.
    fn save(&self, item: &Item) -> Result<Option<Item>, StoreError>;

    /// Deletes the item with the given identifier.
    ///
    /// Returns whether an item was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError>;
}
