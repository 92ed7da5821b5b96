// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidTripId;
    assert_eq!(format!("{err}"), "Trip identifier must be non-zero");

    let err: DomainError = DomainError::InvalidTripName { trip_id: 12 };
    assert_eq!(format!("{err}"), "Trip 12 has an empty name");

    let err: DomainError = DomainError::InvalidVariationId { trip_id: 12 };
    assert_eq!(
        format!("{err}"),
        "Trip 12 has a variation without an identifier"
    );

    let err: DomainError = DomainError::DuplicateVariation {
        trip_id: 12,
        variation_id: 13,
    };
    assert_eq!(
        format!("{err}"),
        "Variation 13 appears more than once on trip 12"
    );

    let err: DomainError = DomainError::DateParseError {
        date_string: String::from("soon"),
        error: String::from("input contains invalid characters"),
    };
    assert_eq!(
        format!("{err}"),
        "Failed to parse date 'soon': input contains invalid characters"
    );
}
