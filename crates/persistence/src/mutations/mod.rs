// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! Mutations use Diesel DSL, with `last_insert_rowid()` imported from the
//! `backend` module for identifier assignment.

pub mod items;

pub use items::{delete_item, insert_item, update_item};
