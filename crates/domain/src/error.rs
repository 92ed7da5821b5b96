// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Trip identifier is missing (zero).
    InvalidTripId,
    /// Trip name is empty or invalid.
    InvalidTripName {
        /// The trip the name belongs to.
        trip_id: u64,
    },
    /// A variation has a missing (zero) identifier.
    InvalidVariationId {
        /// The owning trip.
        trip_id: u64,
    },
    /// The same variation appears more than once on a trip.
    DuplicateVariation {
        /// The owning trip.
        trip_id: u64,
        /// The repeated variation identifier.
        variation_id: u64,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTripId => write!(f, "Trip identifier must be non-zero"),
            Self::InvalidTripName { trip_id } => {
                write!(f, "Trip {trip_id} has an empty name")
            }
            Self::InvalidVariationId { trip_id } => {
                write!(f, "Trip {trip_id} has a variation without an identifier")
            }
            Self::DuplicateVariation {
                trip_id,
                variation_id,
            } => {
                write!(
                    f,
                    "Variation {variation_id} appears more than once on trip {trip_id}"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
