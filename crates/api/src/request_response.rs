// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use item_service_domain::{Item, ItemFields};
use serde::{Deserialize, Serialize};

/// API request body for creating or updating an item.
///
/// Every field is optional on the wire so that missing fields are reported
/// through validation rather than as a malformed body. A supplied `id` is
/// ignored; identifiers come from the store or the request path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRequest {
    /// Ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The item's name.
    pub name: Option<String>,
    /// The item's description.
    pub description: Option<String>,
    /// The item's status.
    pub status: Option<String>,
    /// Contact email for the item.
    pub email: Option<String>,
}

impl ItemRequest {
    /// Creates a request with every field set.
    #[must_use]
    pub fn new(name: &str, description: &str, status: &str, email: &str) -> Self {
        Self {
            id: None,
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            status: Some(status.to_string()),
            email: Some(email.to_string()),
        }
    }

    /// Converts the request into candidate item fields.
    ///
    /// Missing fields become empty strings, which validation rejects.
    #[must_use]
    pub fn into_fields(self) -> ItemFields {
        ItemFields {
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        }
    }
}

/// API representation of a stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// The store-assigned identifier.
    pub id: i64,
    /// The item's name.
    pub name: String,
    /// The item's description.
    pub description: String,
    /// The item's status.
    pub status: String,
    /// Contact email for the item.
    pub email: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.value(),
            name: item.name,
            description: item.description,
            status: item.status,
            email: item.email,
        }
    }
}
