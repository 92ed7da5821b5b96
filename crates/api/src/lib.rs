// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod config;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

use cavebook_domain::{
    SignupTiming, Trip, User, Variation, VariationAvailability, VariationExclusionRule,
    calculate_signup_timing, default_variation, effective_member_price, format_countdown,
    parse_price, validate_trip, variation_availability,
};
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

pub use auth::{AccessLevel, Role, is_trip_leader, resolve_trip_role, resolve_user_role};
pub use capabilities::{
    Capability, TripCapabilities, can_edit_trip, can_purchase_trip, can_view_participant_details,
    can_view_sensitive_info, compute_trip_capabilities, has_trip_admin_access,
    meets_prior_caving_requirement,
};
pub use config::{ConfigError, DEFAULT_TIMEZONE, EngineConfig};
pub use error::{ApiError, translate_domain_error};
pub use request_response::{
    EligibilityReport, SignupTimingResponse, TripMeta, TripRecord, UserRecord, VariationRecord,
    VariationResponse,
};

/// Evaluates signup timing, roles and variation eligibility for trips.
///
/// The engine holds only configuration. Every method is a pure function of
/// its arguments; the current instant is always passed in.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    tz: Tz,
    exclusion_rules: Vec<VariationExclusionRule>,
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Europe::London,
            exclusion_rules: cavebook_domain::default_exclusion_rules(),
        }
    }
}

impl EligibilityEngine {
    /// Builds an engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timezone is unknown.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let tz = config.tz()?;
        Ok(Self {
            tz,
            exclusion_rules: config.exclusion_rules,
        })
    }

    /// The zone trip times are interpreted in.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Converts an instant into the engine's local wall-clock time.
    #[must_use]
    pub fn local_now(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.with_timezone(&self.tz).naive_local()
    }

    /// Computes the trip's signup window at `now`.
    #[must_use]
    pub fn compute_signup_timing(&self, trip: &Trip, now: DateTime<Utc>) -> SignupTiming {
        calculate_signup_timing(trip, self.local_now(now))
    }

    /// Returns the variations the user may pick, in trip order.
    #[must_use]
    pub fn selectable_variations<'a>(&self, trip: &'a Trip, user: &User) -> Vec<&'a Variation> {
        cavebook_domain::selectable_variations(trip, user, &self.exclusion_rules)
    }

    /// Classifies one variation for a user.
    #[must_use]
    pub fn variation_availability(
        &self,
        trip: &Trip,
        variation: &Variation,
        user: &User,
    ) -> VariationAvailability {
        variation_availability(trip, variation, user, &self.exclusion_rules)
    }

    /// Builds the signup section of a report.
    #[must_use]
    pub fn timing_response(&self, trip: &Trip, now: DateTime<Utc>) -> SignupTimingResponse {
        let local_now = self.local_now(now);
        let timing = calculate_signup_timing(trip, local_now);
        let next = timing.next_transition(local_now);

        SignupTimingResponse {
            opens_at: timing.opens_at.map(|t| self.to_rfc3339(t)),
            closes_at: timing.closes_at.map(|t| self.to_rfc3339(t)),
            status: timing.status,
            is_open: timing.is_open(),
            next_transition: next.map(|(boundary, _)| boundary),
            countdown: next.map(|(_, remaining)| format_countdown(remaining)),
        }
    }

    /// Evaluates one trip for one user.
    ///
    /// # Arguments
    ///
    /// * `trip` - The trip (validated here)
    /// * `user` - The current user
    /// * `access_level` - The backend-resolved access level
    /// * `now` - The evaluation instant
    ///
    /// # Errors
    ///
    /// Returns an error if the trip is missing identifying fields.
    pub fn evaluate(
        &self,
        trip: &Trip,
        user: &User,
        access_level: AccessLevel,
        now: DateTime<Utc>,
    ) -> Result<EligibilityReport, ApiError> {
        validate_trip(trip)?;

        debug!(
            trip_id = trip.trip_id,
            event_type = %trip.event_type,
            access_level = access_level.as_str(),
            "Evaluating trip eligibility"
        );

        let discount = trip.members_discount.as_deref();
        let variations: Vec<VariationResponse> = trip
            .variations
            .iter()
            .map(|v| VariationResponse {
                variation_id: v.variation_id,
                sku: v.sku.clone(),
                price: parse_price(&v.price).unwrap_or(0.0),
                member_price: effective_member_price(&v.price, discount),
                availability: self.variation_availability(trip, v, user),
            })
            .collect();

        Ok(EligibilityReport {
            trip_id: trip.trip_id,
            timezone: self.tz.name().to_string(),
            signup: self.timing_response(trip, now),
            role: resolve_user_role(user, access_level),
            trip_role: resolve_trip_role(user, trip, access_level),
            is_trip_leader: is_trip_leader(user, trip),
            has_signed_up: user.has_purchased(trip),
            capabilities: compute_trip_capabilities(user, trip, access_level),
            variations,
            default_variation_id: default_variation(trip, user, &self.exclusion_rules)
                .map(|v| v.variation_id),
        })
    }

    /// Evaluates raw backend records.
    ///
    /// Unknown access level tags are treated as `public`.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip is missing identifying fields.
    pub fn evaluate_records(
        &self,
        trip: TripRecord,
        user: UserRecord,
        access_level: &str,
        now: DateTime<Utc>,
    ) -> Result<EligibilityReport, ApiError> {
        let level = parse_access_level(access_level);
        self.evaluate(&trip.into_trip(), &user.into_user(), level, now)
    }

    fn to_rfc3339(&self, local: NaiveDateTime) -> String {
        // Wall-clock times inside a DST gap are moved past the gap.
        self.tz
            .from_local_datetime(&local)
            .earliest()
            .or_else(|| {
                self.tz
                    .from_local_datetime(&(local + Duration::hours(1)))
                    .earliest()
            })
            .map_or_else(
                || local.and_utc().to_rfc3339(),
                |resolved| resolved.to_rfc3339(),
            )
    }
}

/// Parses a backend access level, falling back to `public` for unknown tags.
#[must_use]
pub fn parse_access_level(tag: &str) -> AccessLevel {
    AccessLevel::parse(tag).unwrap_or_else(|| {
        warn!(tag, "Unknown access level, treating as public");
        AccessLevel::Public
    })
}
