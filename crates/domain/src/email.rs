// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Email format validation.

use regex::Regex;
use std::sync::LazyLock;

/// Accepted email shape.
///
/// - local part: alphanumerics, optionally joined by single `._%+-` separators
/// - domain label: alphanumerics, optionally joined by single hyphens
/// - one or more `.` + two-or-more letter labels (TLD and subdomains)
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+(?:[._%+-][A-Za-z0-9]+)*@[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*(?:\.[A-Za-z]{2,})+$",
    )
    .expect("Invalid email regex")
});

/// Returns whether `candidate` is a well-formed email address.
///
/// This is a pure predicate. It does not trim, normalize, or look up the
/// domain.
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}
