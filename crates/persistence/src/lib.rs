// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Item Service.
//!
//! This crate stores items in `SQLite` through Diesel and exposes them to the
//! rest of the system as an [`ItemStore`](item_service::ItemStore).
//!
//! ## Layout
//!
//! - `backend`: connection setup, embedded migrations, PRAGMA handling
//! - `queries`: read-only item queries
//! - `mutations`: item inserts, updates, and deletes
//! - `store`: the thread-safe `ItemStore` adapter
//!
//! ## Databases
//!
//! - In-memory databases are used for tests and for running the server
//!   without a file. Each instance is isolated.
//! - File databases run in WAL mode.
//!
//! ## Identifiers
//!
//! The `items` table uses `AUTOINCREMENT`, so identifiers of deleted items
//! are never handed out again.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use item_service_domain::{Item, ItemFields, ItemId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use store::SqliteItemStore;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for items.
///
/// Owns a single `SQLite` connection. Methods take `&mut self`; wrap the
/// adapter in [`SqliteItemStore`] for shared, concurrent use.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_items_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    // ========================================================================
    // Item Queries
    // ========================================================================

    /// Lists every item, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_items(&mut self) -> Result<Vec<Item>, PersistenceError> {
        queries::list_items(&mut self.conn)
    }

    /// Lists the identifiers of every item.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_item_ids(&mut self) -> Result<Vec<ItemId>, PersistenceError> {
        queries::list_item_ids(&mut self.conn)
    }

    /// Retrieves an item by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_item(&mut self, id: ItemId) -> Result<Option<Item>, PersistenceError> {
        queries::get_item(&mut self.conn, id)
    }

    /// Counts stored items.
    #[cfg(test)]
    pub(crate) fn count_items(&mut self) -> Result<i64, PersistenceError> {
        queries::count_items(&mut self.conn)
    }

    // ========================================================================
    // Item Mutations
    // ========================================================================

    /// Inserts a new item.
    ///
    /// # Returns
    ///
    /// The stored item with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn insert_item(&mut self, fields: &ItemFields) -> Result<Item, PersistenceError> {
        mutations::insert_item(&mut self.conn, fields)
    }

    /// Updates an existing item.
    ///
    /// # Returns
    ///
    /// `None` if the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn update_item(&mut self, item: &Item) -> Result<Option<Item>, PersistenceError> {
        mutations::update_item(&mut self.conn, item)
    }

    /// Deletes an item.
    ///
    /// # Returns
    ///
    /// Whether an item was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn delete_item(&mut self, id: ItemId) -> Result<bool, PersistenceError> {
        mutations::delete_item(&mut self.conn, id)
    }
}
