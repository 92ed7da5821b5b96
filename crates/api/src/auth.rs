// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access levels, user roles and trip leader matching.

use cavebook_domain::{Trip, User, normalize_name};
use serde::{Deserialize, Serialize};

/// Visibility tier resolved by the backend from membership and order data.
///
/// The engine never computes this; it only compares tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Anonymous visitor.
    Public,
    /// Any authenticated user.
    LoggedIn,
    /// Holds an order for the trip.
    Participant,
    /// Holds an event-specific role (e.g. kit or lift coordinator).
    EventRole,
    /// Site administrator.
    Admin,
    /// Site owner.
    SuperAdmin,
}

impl AccessLevel {
    /// Parses a backend access level tag.
    ///
    /// Returns `None` for unknown tags; callers decide the fallback.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "public" => Some(Self::Public),
            "logged_in" => Some(Self::LoggedIn),
            "participant" => Some(Self::Participant),
            "event_role" => Some(Self::EventRole),
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Returns the backend tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::LoggedIn => "logged_in",
            Self::Participant => "participant",
            Self::EventRole => "event_role",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Returns true for `Admin` and `SuperAdmin`.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

/// User roles, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Not a member (or not logged in).
    Guest,
    /// Logged-in club member.
    Member,
    /// Named leader of the trip being viewed.
    ///
    /// Only produced by `resolve_trip_role`.
    TripLeader,
    /// Club committee member.
    CommitteeMember,
    /// Site administrator.
    Admin,
    /// Site owner.
    SuperAdmin,
}

/// Resolves a user's global role.
///
/// Precedence: `SuperAdmin` > `Admin` (from the access level) >
/// `CommitteeMember` > `Member` (from the user's flags) > `Guest`.
/// Trip leadership is per trip and is not considered here.
#[must_use]
pub const fn resolve_user_role(user: &User, access_level: AccessLevel) -> Role {
    match access_level {
        AccessLevel::SuperAdmin => Role::SuperAdmin,
        AccessLevel::Admin => Role::Admin,
        _ if user.is_committee_member() => Role::CommitteeMember,
        _ if user.is_member() => Role::Member,
        _ => Role::Guest,
    }
}

/// Resolves a user's role with respect to one trip.
///
/// The global role, raised to `TripLeader` if the user leads the trip.
#[must_use]
pub fn resolve_trip_role(user: &User, trip: &Trip, access_level: AccessLevel) -> Role {
    let role = resolve_user_role(user, access_level);
    if is_trip_leader(user, trip) {
        role.max(Role::TripLeader)
    } else {
        role
    }
}

/// Checks whether the user is named in the trip's leader field.
///
/// Leaders are stored as free text, so this compares the user's
/// `"first last"` against each comma-separated entry, ignoring case and
/// extra whitespace. Leaders without a site account can still be listed.
/// Logged-out users never match.
#[must_use]
pub fn is_trip_leader(user: &User, trip: &Trip) -> bool {
    if !user.is_logged_in {
        return false;
    }
    let Some(name) = user.normalized_name() else {
        return false;
    };
    trip.leader_names()
        .any(|leader| normalize_name(leader) == name)
}
