// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.

pub mod items;

pub use items::{get_item, list_item_ids, list_items};

#[cfg(test)]
pub use items::count_items;
