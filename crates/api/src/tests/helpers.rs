// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Arc;

use item_service::{ItemStore, StoreError};
use item_service_domain::{Item, ItemFields, ItemId};
use item_service_persistence::SqliteItemStore;

use crate::ItemRequest;

pub fn create_test_store() -> Arc<SqliteItemStore> {
    Arc::new(SqliteItemStore::new_in_memory().unwrap())
}

pub fn create_valid_request() -> ItemRequest {
    ItemRequest::new("Valid Item", "Desc", "Status", "test@test.com")
}

/// A store holding one item whose save always fails.
pub struct FailingSaveStore;

pub const FAILING_ITEM_ID: i64 = 7;

impl ItemStore for FailingSaveStore {
    fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        Ok(Vec::new())
    }

    fn find_all_ids(&self) -> Result<Vec<ItemId>, StoreError> {
        Ok(vec![ItemId::new(FAILING_ITEM_ID)])
    }

    fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(Some(Item::from_fields(
            id,
            ItemFields::new("Broken", "Desc", "NEW", "test@test.com"),
        )))
    }

    fn create(&self, _fields: &ItemFields) -> Result<Item, StoreError> {
        Err(StoreError::Unavailable(String::from("read only")))
    }

    fn save(&self, _item: &Item) -> Result<Option<Item>, StoreError> {
        Err(StoreError::OperationFailed {
            operation: String::from("save"),
            message: String::from("disk full"),
        })
    }

    fn delete_by_id(&self, _id: ItemId) -> Result<bool, StoreError> {
        Ok(false)
    }
}
