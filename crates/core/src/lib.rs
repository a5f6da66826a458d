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

mod error;
mod processor;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::{ProcessingError, StoreError};
pub use processor::{BatchProcessor, DEFAULT_POOL_SIZE, ProcessorConfig};
pub use store::ItemStore;
