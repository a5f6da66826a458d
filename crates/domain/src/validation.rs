// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::email::is_valid_email;
use crate::error::{DomainError, FieldErrors};
use crate::types::ItemFields;

/// Message reported for a required field that is empty.
pub const EMPTY_FIELD_MESSAGE: &str = "must not be empty";

/// Message reported for a malformed email.
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";

/// Validates an item's fields before persistence.
///
/// Every failing field is reported, not just the first one.
///
/// # Arguments
///
/// * `fields` - The candidate item fields
///
/// # Returns
///
/// * `Ok(())` if every field is valid
/// * `Err(DomainError::InvalidFields)` with one message per failing field
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The description is empty
/// - The status is empty
/// - The email does not match the accepted email format
pub fn validate_item_fields(fields: &ItemFields) -> Result<(), DomainError> {
    let mut errors: FieldErrors = FieldErrors::new();

    // Rule: name, description and status are required
    for (field, value) in [
        ("name", &fields.name),
        ("description", &fields.description),
        ("status", &fields.status),
    ] {
        if value.is_empty() {
            errors.add(field, EMPTY_FIELD_MESSAGE);
        }
    }

    // Rule: email must be well-formed
    if !is_valid_email(&fields.email) {
        errors.add("email", INVALID_EMAIL_MESSAGE);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::InvalidFields(errors))
    }
}
