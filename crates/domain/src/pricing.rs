// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member pricing.

/// Parses a backend price string into a finite number.
#[must_use]
pub fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Computes the price a member pays for a variation.
///
/// # Arguments
///
/// * `base_price` - The variation's base price text
/// * `discount` - The trip's member discount text, if any
///
/// # Returns
///
/// - `0.0` if the base price is not numeric
/// - the base price if the discount is absent, not numeric, or not positive
/// - otherwise `max(base - discount, 0)`
#[must_use]
pub fn effective_member_price(base_price: &str, discount: Option<&str>) -> f64 {
    let Some(base) = parse_price(base_price) else {
        return 0.0;
    };

    match discount.and_then(parse_price) {
        Some(d) if d > 0.0 => (base - d).max(0.0),
        _ => base,
    }
}
