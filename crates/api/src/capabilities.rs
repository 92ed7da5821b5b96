// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for trip pages.
//!
//! Capabilities tell the UI what a user may see or do on one trip. They
//! are advisory only and do not replace backend checks on purchase.

use crate::auth::{AccessLevel, is_trip_leader};
use cavebook_domain::{Trip, User};
use serde::{Deserialize, Serialize};

/// A permission flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::Allowed))
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// Everything a user may do on one trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCapabilities {
    /// Change the trip's details.
    pub can_edit_trip: Capability,
    /// Manage signups and the trip's admin views.
    pub has_trip_admin_access: Capability,
    /// See medical and emergency contact details.
    pub can_view_sensitive_info: Capability,
    /// Offered the buy button.
    pub can_purchase_trip: Capability,
    /// See who is on the trip.
    pub can_view_participant_details: Capability,
    /// Advisory: shown next to the buy button, does not gate it.
    pub meets_prior_caving_requirement: Capability,
}

/// Trip leaders and administrators can edit the trip.
#[must_use]
pub fn can_edit_trip(user: &User, trip: &Trip, access_level: AccessLevel) -> bool {
    access_level.is_admin() || is_trip_leader(user, trip)
}

/// Administrators, trip leaders and event role holders manage the trip.
#[must_use]
pub fn has_trip_admin_access(user: &User, trip: &Trip, access_level: AccessLevel) -> bool {
    access_level.is_admin() || is_trip_leader(user, trip) || access_level == AccessLevel::EventRole
}

/// Medical and emergency contact details.
#[must_use]
pub fn can_view_sensitive_info(user: &User, trip: &Trip, access_level: AccessLevel) -> bool {
    has_trip_admin_access(user, trip, access_level) || user.is_committee_member()
}

/// Whether the buy button is offered.
///
/// Trips welcoming non-members can be bought by anyone, logged in or not.
#[must_use]
pub fn can_purchase_trip(user: &User, trip: &Trip, access_level: AccessLevel) -> bool {
    trip.non_members_welcome || user.is_member() || has_trip_admin_access(user, trip, access_level)
}

/// Whether the participant list shows names and details.
///
/// Anyone who manages the trip can also see who is on it.
#[must_use]
pub fn can_view_participant_details(user: &User, trip: &Trip, access_level: AccessLevel) -> bool {
    access_level >= AccessLevel::Participant
        || user.is_committee_member()
        || has_trip_admin_access(user, trip, access_level)
}

/// Whether the user satisfies the trip's "must have caved with us before" flag.
///
/// Members qualify; otherwise any earlier purchase counts.
#[must_use]
pub fn meets_prior_caving_requirement(user: &User, trip: &Trip) -> bool {
    !trip.must_caved_with_us_before || user.is_member() || !user.purchases.is_empty()
}

/// Computes all trip capabilities for a user.
#[must_use]
pub fn compute_trip_capabilities(
    user: &User,
    trip: &Trip,
    access_level: AccessLevel,
) -> TripCapabilities {
    TripCapabilities {
        can_edit_trip: Capability::from_bool(can_edit_trip(user, trip, access_level)),
        has_trip_admin_access: Capability::from_bool(has_trip_admin_access(
            user,
            trip,
            access_level,
        )),
        can_view_sensitive_info: Capability::from_bool(can_view_sensitive_info(
            user,
            trip,
            access_level,
        )),
        can_purchase_trip: Capability::from_bool(can_purchase_trip(user, trip, access_level)),
        can_view_participant_details: Capability::from_bool(can_view_participant_details(
            user,
            trip,
            access_level,
        )),
        meets_prior_caving_requirement: Capability::from_bool(meets_prior_caving_requirement(
            user, trip,
        )),
    }
}
