// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! Transport-agnostic API boundary for the Item Service.
//!
//! Request DTOs are validated here, translated into store and processor
//! calls, and results are returned as response DTOs. Errors from lower
//! layers are translated explicitly into [`ApiError`].

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_domain_error, translate_processing_error, translate_store_error,
};
pub use handlers::{create_item, delete_item, get_item, list_items, process_items, update_item};
pub use request_response::{ItemRequest, ItemResponse};
