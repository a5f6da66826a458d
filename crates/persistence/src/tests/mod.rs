// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use item_service_domain::ItemFields;

pub fn create_test_fields() -> ItemFields {
    ItemFields::new("Valid Item", "Desc", "Status", "test@test.com")
}

pub fn create_named_fields(name: &str) -> ItemFields {
    ItemFields::new(name, "Desc", "NEW", "test@test.com")
}
