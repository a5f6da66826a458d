// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use item_service_domain::{Item, ItemId};

/// Type alias for item row data from `SQLite`.
///
/// Column order: id, name, description, status, email.
pub type ItemRow = (i64, String, String, String, String);

/// Converts a loaded row into a domain item.
pub fn row_to_item(row: ItemRow) -> Item {
    let (id, name, description, status, email) = row;
    Item {
        id: ItemId::new(id),
        name,
        description,
        status,
        email,
    }
}
