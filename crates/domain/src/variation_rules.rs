// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Variation selectability.
//!
//! A variation can be picked when it is in stock with a positive quantity
//! and no exclusion rule hides it from the user.

use crate::types::{EventType, Trip, User, Variation};
use serde::{Deserialize, Serialize};

/// Who an exclusion rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionAudience {
    /// Logged-in members.
    Members,
    /// Everyone who is not a logged-in member.
    NonMembers,
}

impl ExclusionAudience {
    /// Returns true if the user falls in this audience.
    #[must_use]
    pub const fn includes(&self, user: &User) -> bool {
        match self {
            Self::Members => user.is_member(),
            Self::NonMembers => !user.is_member(),
        }
    }
}

/// Hides variations of one event type whose SKU contains a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationExclusionRule {
    /// Event type the rule applies to.
    pub event_type: EventType,
    /// Case-insensitive substring searched for in the SKU.
    pub sku_marker: String,
    /// Users the variation is hidden from.
    pub audience: ExclusionAudience,
}

impl VariationExclusionRule {
    /// Returns true if this rule hides `variation` of `trip` from `user`.
    #[must_use]
    pub fn excludes(&self, trip: &Trip, variation: &Variation, user: &User) -> bool {
        if self.sku_marker.is_empty() || trip.event_type != self.event_type {
            return false;
        }
        variation
            .sku
            .to_lowercase()
            .contains(&self.sku_marker.to_lowercase())
            && self.audience.includes(user)
    }
}

/// The built-in rule set: members cannot pick the BCA-member ticket on
/// giggle trips.
#[must_use]
pub fn default_exclusion_rules() -> Vec<VariationExclusionRule> {
    vec![VariationExclusionRule {
        event_type: EventType::GiggleTrip,
        sku_marker: String::from("BCA_MEMBER"),
        audience: ExclusionAudience::Members,
    }]
}

/// Whether a variation can be picked, and why not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationAvailability {
    /// The user can pick it.
    Selectable,
    /// Not in stock, or none left.
    OutOfStock,
    /// Hidden from this user by an exclusion rule.
    Excluded,
}

impl VariationAvailability {
    /// Returns true for `Selectable`.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        matches!(self, Self::Selectable)
    }
}

/// Classifies one variation for a user.
#[must_use]
pub fn variation_availability(
    trip: &Trip,
    variation: &Variation,
    user: &User,
    rules: &[VariationExclusionRule],
) -> VariationAvailability {
    if !variation.is_in_stock() {
        return VariationAvailability::OutOfStock;
    }
    if rules.iter().any(|rule| rule.excludes(trip, variation, user)) {
        return VariationAvailability::Excluded;
    }
    VariationAvailability::Selectable
}

/// Returns the variations of `trip` that `user` may pick, in trip order.
#[must_use]
pub fn selectable_variations<'a>(
    trip: &'a Trip,
    user: &User,
    rules: &[VariationExclusionRule],
) -> Vec<&'a Variation> {
    trip.variations
        .iter()
        .filter(|v| variation_availability(trip, v, user, rules).is_selectable())
        .collect()
}

/// Returns the variation to preselect: the first selectable one.
#[must_use]
pub fn default_variation<'a>(
    trip: &'a Trip,
    user: &User,
    rules: &[VariationExclusionRule],
) -> Option<&'a Variation> {
    trip.variations
        .iter()
        .find(|v| variation_availability(trip, v, user, rules).is_selectable())
}
