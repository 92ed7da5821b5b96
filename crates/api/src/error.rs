// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use cavebook_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain errors and represent the engine's contract
/// with its callers. Callers treat any of these as "the trip is unusable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A payload could not be decoded.
    MalformedPayload {
        /// What was being decoded.
        payload: String,
        /// The decoder's message.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::MalformedPayload { payload, message } => {
                write!(f, "Malformed {payload} payload: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidTripId => ApiError::InvalidInput {
            field: String::from("id"),
            message,
        },
        DomainError::InvalidTripName { .. } => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidVariationId { .. } => ApiError::InvalidInput {
            field: String::from("variations.id"),
            message,
        },
        DomainError::DuplicateVariation { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_variation"),
            message,
        },
        DomainError::DateParseError { .. } => ApiError::InvalidInput {
            field: String::from("date"),
            message,
        },
    }
}
