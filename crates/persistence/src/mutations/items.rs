// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Item mutation operations.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::items;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use item_service_domain::{Item, ItemFields, ItemId};
use tracing::debug;

/// Inserts a new item and lets the database assign its identifier.
///
/// The insert and identifier lookup run in one transaction.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_item(
    conn: &mut SqliteConnection,
    fields: &ItemFields,
) -> Result<Item, PersistenceError> {
    conn.transaction::<Item, PersistenceError, _>(|conn| {
        diesel::insert_into(items::table)
            .values((
                items::name.eq(&fields.name),
                items::description.eq(&fields.description),
                items::status.eq(&fields.status),
                items::email.eq(&fields.email),
            ))
            .execute(conn)?;

        let item_id: i64 = get_last_insert_rowid(conn)?;
        debug!(item_id, "Inserted new item");

        Ok(Item::from_fields(ItemId::new(item_id), fields.clone()))
    })
}

/// Overwrites the fields of an existing item.
///
/// Returns `Ok(None)` if no row has the item's identifier; nothing is
/// inserted in that case.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_item(
    conn: &mut SqliteConnection,
    item: &Item,
) -> Result<Option<Item>, PersistenceError> {
    let updated: usize = diesel::update(items::table.filter(items::id.eq(item.id.value())))
        .set((
            items::name.eq(&item.name),
            items::description.eq(&item.description),
            items::status.eq(&item.status),
            items::email.eq(&item.email),
        ))
        .execute(conn)?;

    if updated == 0 {
        debug!(item_id = item.id.value(), "Update matched no item");
        return Ok(None);
    }

    Ok(Some(item.clone()))
}

/// Deletes an item.
///
/// Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_item(conn: &mut SqliteConnection, id: ItemId) -> Result<bool, PersistenceError> {
    let deleted: usize =
        diesel::delete(items::table.filter(items::id.eq(id.value()))).execute(conn)?;

    debug!(item_id = id.value(), deleted, "Deleted item");
    Ok(deleted > 0)
}
