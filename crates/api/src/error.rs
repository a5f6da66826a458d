// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use std::collections::BTreeMap;

use item_service::{ProcessingError, StoreError};
use item_service_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more request fields were invalid.
    ValidationFailed {
        /// Field name to message.
        errors: BTreeMap<String, String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Waiting for a long-running operation timed out.
    ///
    /// The operation may still be running.
    Timeout {
        /// A description of what timed out.
        message: String,
    },
    /// Batch processing failed.
    ProcessingFailed {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed:")?;
                for (field, message) in errors {
                    write!(f, " {field}: {message};")?;
                }
                Ok(())
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Timeout { message } => write!(f, "Timed out: {message}"),
            Self::ProcessingFailed { message } => write!(f, "Processing failed: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        translate_store_error(err)
    }
}

impl From<ProcessingError> for ApiError {
    fn from(err: ProcessingError) -> Self {
        translate_processing_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidFields(errors) => ApiError::ValidationFailed {
            errors: errors.into_map(),
        },
    }
}

/// Translates a store error into an API error.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    ApiError::Internal {
        message: err.to_string(),
    }
}

/// Translates a batch processing error into an API error.
#[must_use]
pub fn translate_processing_error(err: ProcessingError) -> ApiError {
    ApiError::ProcessingFailed {
        message: err.to_string(),
    }
}
