// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Item query operations.

use crate::data_models::{ItemRow, row_to_item};
use crate::diesel_schema::items;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use item_service_domain::{Item, ItemId};

/// Lists every item, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_items(conn: &mut SqliteConnection) -> Result<Vec<Item>, PersistenceError> {
    let rows: Vec<ItemRow> = items::table
        .select((
            items::id,
            items::name,
            items::description,
            items::status,
            items::email,
        ))
        .order(items::id.asc())
        .load::<ItemRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_items: {e}")))?;

    Ok(rows.into_iter().map(row_to_item).collect())
}

/// Lists the identifiers of every item, ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_item_ids(conn: &mut SqliteConnection) -> Result<Vec<ItemId>, PersistenceError> {
    let ids: Vec<i64> = items::table
        .select(items::id)
        .order(items::id.asc())
        .load::<i64>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_item_ids: {e}")))?;

    Ok(ids.into_iter().map(ItemId::new).collect())
}

/// Looks up a single item.
///
/// # Errors
///
/// Returns an error if the query fails. A missing item is `Ok(None)`.
pub fn get_item(conn: &mut SqliteConnection, id: ItemId) -> Result<Option<Item>, PersistenceError> {
    let row: Option<ItemRow> = items::table
        .filter(items::id.eq(id.value()))
        .select((
            items::id,
            items::name,
            items::description,
            items::status,
            items::email,
        ))
        .first::<ItemRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_item: {e}")))?;

    Ok(row.map(row_to_item))
}

/// Counts stored items.
///
/// # Errors
///
/// Returns an error if the query fails.
#[cfg(test)]
pub fn count_items(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    items::table
        .count()
        .get_result::<i64>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_items: {e}")))
}
