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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod email;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use email::is_valid_email;
pub use error::{DomainError, FieldErrors};
pub use types::{Item, ItemFields, ItemId, PROCESSED_STATUS};
pub use validation::{EMPTY_FIELD_MESSAGE, INVALID_EMAIL_MESSAGE, validate_item_fields};
