// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Trip;
use std::collections::HashSet;

/// Validates that a trip carries the fields needed to identify it.
///
/// Optional metadata (dates, flags, discount) is never rejected here; it
/// falls back to defaults during evaluation.
///
/// # Arguments
///
/// * `trip` - The trip to validate
///
/// # Returns
///
/// * `Ok(())` if the trip is usable
/// * `Err(DomainError)` if an identifying field is missing
///
/// # Errors
///
/// Returns an error if:
/// - The trip identifier is zero
/// - The trip name is blank
/// - A variation identifier is zero
/// - A variation identifier appears twice
pub fn validate_trip(trip: &Trip) -> Result<(), DomainError> {
    // Rule: trip must have an identifier
    if trip.trip_id == 0 {
        return Err(DomainError::InvalidTripId);
    }

    // Rule: name must not be empty
    if trip.name.trim().is_empty() {
        return Err(DomainError::InvalidTripName {
            trip_id: trip.trip_id,
        });
    }

    // Rule: variations must be identifiable and unique
    let mut seen: HashSet<u64> = HashSet::new();
    for variation in &trip.variations {
        if variation.variation_id == 0 {
            return Err(DomainError::InvalidVariationId {
                trip_id: trip.trip_id,
            });
        }
        if !seen.insert(variation.variation_id) {
            return Err(DomainError::DuplicateVariation {
                trip_id: trip.trip_id,
                variation_id: variation.variation_id,
            });
        }
    }

    Ok(())
}
