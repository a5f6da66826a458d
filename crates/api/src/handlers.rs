// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for item operations and batch processing.
//!
//! These functions are transport-agnostic: they take a store (or processor)
//! and request DTOs, and return response DTOs or an [`ApiError`].

use std::time::Duration;

use item_service::{BatchProcessor, ItemStore};
use item_service_domain::{Item, ItemFields, ItemId, validate_item_fields};
use tracing::{debug, info, warn};

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{ItemRequest, ItemResponse};

fn item_not_found(id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Item"),
        message: format!("Item with id {id} not found"),
    }
}

/// Lists every stored item.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_items<S: ItemStore + ?Sized>(store: &S) -> Result<Vec<ItemResponse>, ApiError> {
    let items: Vec<Item> = store.find_all()?;
    debug!(count = items.len(), "Listed items");
    Ok(items.into_iter().map(ItemResponse::from).collect())
}

/// Creates a new item.
///
/// Any `id` in the request is ignored; the store assigns one.
///
/// # Errors
///
/// Returns [`ApiError::ValidationFailed`] with every failing field if the
/// request is invalid, or an internal error if the store fails.
pub fn create_item<S: ItemStore + ?Sized>(
    store: &S,
    request: ItemRequest,
) -> Result<ItemResponse, ApiError> {
    let fields: ItemFields = request.into_fields();
    validate_item_fields(&fields).map_err(translate_domain_error)?;

    let item: Item = store.create(&fields)?;
    info!(item_id = %item.id, "Created item");
    Ok(ItemResponse::from(item))
}

/// Fetches a single item.
///
/// # Errors
///
/// Returns [`ApiError::ResourceNotFound`] if no item has this id.
pub fn get_item<S: ItemStore + ?Sized>(store: &S, id: i64) -> Result<ItemResponse, ApiError> {
    store
        .find_by_id(ItemId::new(id))?
        .map(ItemResponse::from)
        .ok_or_else(|| item_not_found(id))
}

/// Replaces the fields of an existing item.
///
/// Existence is checked before validation, so a missing id is reported as
/// not found even when the body is also invalid. An update never creates
/// an item.
///
/// # Errors
///
/// Returns [`ApiError::ResourceNotFound`] if the item does not exist (or is
/// deleted concurrently), or [`ApiError::ValidationFailed`] if the request
/// is invalid.
pub fn update_item<S: ItemStore + ?Sized>(
    store: &S,
    id: i64,
    request: ItemRequest,
) -> Result<ItemResponse, ApiError> {
    let item_id: ItemId = ItemId::new(id);
    if store.find_by_id(item_id)?.is_none() {
        return Err(item_not_found(id));
    }

    let fields: ItemFields = request.into_fields();
    validate_item_fields(&fields).map_err(translate_domain_error)?;

    let updated: Item = store
        .save(&Item::from_fields(item_id, fields))?
        .ok_or_else(|| item_not_found(id))?;
    info!(item_id = %item_id, "Updated item");
    Ok(ItemResponse::from(updated))
}

/// Deletes an item.
///
/// # Errors
///
/// Returns [`ApiError::ResourceNotFound`] if no item has this id.
pub fn delete_item<S: ItemStore + ?Sized>(store: &S, id: i64) -> Result<(), ApiError> {
    if store.delete_by_id(ItemId::new(id))? {
        info!(item_id = id, "Deleted item");
        Ok(())
    } else {
        Err(item_not_found(id))
    }
}

/// Runs batch processing and waits for it, up to `timeout`.
///
/// When the wait elapses the units already dispatched keep running and
/// complete their writes; only the wait is abandoned.
///
/// # Errors
///
/// Returns [`ApiError::Timeout`] if the wait elapses, or
/// [`ApiError::ProcessingFailed`] if any unit of work fails.
pub async fn process_items<S: ItemStore>(
    processor: &BatchProcessor<S>,
    timeout: Duration,
) -> Result<Vec<ItemResponse>, ApiError> {
    info!(timeout_ms = timeout.as_millis(), "Batch processing requested");

    match tokio::time::timeout(timeout, processor.process_all()).await {
        Ok(result) => {
            let items: Vec<Item> = result?;
            info!(processed = items.len(), "Batch processing finished");
            Ok(items.into_iter().map(ItemResponse::from).collect())
        }
        Err(_) => {
            warn!(
                timeout_ms = timeout.as_millis(),
                "Timed out waiting for batch processing"
            );
            Err(ApiError::Timeout {
                message: format!(
                    "Batch processing did not finish within {} ms",
                    timeout.as_millis()
                ),
            })
        }
    }
}
