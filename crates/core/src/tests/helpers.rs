// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory item store with fault injection for processor tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

use item_service_domain::{Item, ItemFields, ItemId};

use crate::{ItemStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<ItemId, Item>>,
    next_id: AtomicI64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    save_calls: AtomicUsize,
    /// Time each lookup spends "in the store".
    pub lookup_delay: Duration,
    /// Ids removed right after the snapshot is read.
    pub delete_after_snapshot: Vec<ItemId>,
    /// Id whose row vanishes between lookup and save.
    pub vanish_before_save: Option<ItemId>,
    /// Id whose save fails.
    pub fail_save_for: Option<ItemId>,
    /// Id whose lookup panics.
    pub panic_on_lookup_for: Option<ItemId>,
    /// Fail the snapshot read.
    pub fail_snapshot: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                self.create(&create_test_fields(&format!("Item {i}")))
                    .unwrap()
            })
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.items.lock().unwrap().values().cloned().collect()
    }

    fn enter(&self) {
        let now: usize = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ItemStore for MemoryStore {
    fn find_all(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.snapshot())
    }

    fn find_all_ids(&self) -> Result<Vec<ItemId>, StoreError> {
        if self.fail_snapshot {
            return Err(StoreError::Unavailable(String::from("snapshot refused")));
        }
        let mut items = self.items.lock().unwrap();
        let ids: Vec<ItemId> = items.keys().copied().collect();
        for victim in &self.delete_after_snapshot {
            items.remove(victim);
        }
        Ok(ids)
    }

    fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        self.enter();
        if !self.lookup_delay.is_zero() {
            std::thread::sleep(self.lookup_delay);
        }
        if self.panic_on_lookup_for == Some(id) {
            self.leave();
            panic!("lookup exploded for item {id}");
        }
        let found: Option<Item> = self.items.lock().unwrap().get(&id).cloned();
        self.leave();
        Ok(found)
    }

    fn create(&self, fields: &ItemFields) -> Result<Item, StoreError> {
        let id: ItemId = ItemId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let item: Item = Item::from_fields(id, fields.clone());
        self.items.lock().unwrap().insert(id, item.clone());
        Ok(item)
    }

    fn save(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_save_for == Some(item.id) {
            return Err(StoreError::OperationFailed {
                operation: String::from("save"),
                message: String::from("disk full"),
            });
        }
        let mut items = self.items.lock().unwrap();
        if self.vanish_before_save == Some(item.id) {
            items.remove(&item.id);
        }
        match items.get_mut(&item.id) {
            Some(stored) => {
                *stored = item.clone();
                Ok(Some(item.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_by_id(&self, id: ItemId) -> Result<bool, StoreError> {
        Ok(self.items.lock().unwrap().remove(&id).is_some())
    }
}

pub fn create_test_fields(name: &str) -> ItemFields {
    ItemFields::new(name, "Desc", "NEW", "test@test.com")
}
