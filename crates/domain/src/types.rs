// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// The status value written by batch processing.
pub const PROCESSED_STATUS: &str = "PROCESSED";

/// Store-assigned identifier of an item.
///
/// Identifiers are opaque to callers. They are assigned once on creation
/// and never change or get reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Creates an item identifier from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// The mutable fields of an item.
///
/// This is what callers supply on create and update; the identifier is
/// always owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemFields {
    /// The item's name.
    pub name: String,
    /// The item's description.
    pub description: String,
    /// The item's status.
    pub status: String,
    /// Contact email for the item.
    pub email: String,
}

impl ItemFields {
    /// Creates a new set of item fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: status.into(),
            email: email.into(),
        }
    }
}

/// A persisted item.
///
/// Field names match the wire and storage representation verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The store-assigned identifier.
    pub id: ItemId,
    /// The item's name.
    pub name: String,
    /// The item's description.
    pub description: String,
    /// The item's status.
    pub status: String,
    /// Contact email for the item.
    pub email: String,
}

impl Item {
    /// Builds an item from an identifier and its fields.
    #[must_use]
    pub fn from_fields(id: ItemId, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            status: fields.status,
            email: fields.email,
        }
    }

    /// Returns a copy of this item's mutable fields.
    #[must_use]
    pub fn fields(&self) -> ItemFields {
        ItemFields {
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status.clone(),
            email: self.email.clone(),
        }
    }

    /// Overwrites the status with [`PROCESSED_STATUS`].
    pub fn mark_processed(&mut self) {
        self.status = PROCESSED_STATUS.to_string();
    }

    /// Returns whether the item has been batch processed.
    #[must_use]
    pub fn is_processed(&self) -> bool {
        self.status == PROCESSED_STATUS
    }
}
