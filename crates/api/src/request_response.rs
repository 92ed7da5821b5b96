// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire shapes: `WooCommerce` records in, eligibility reports out.

use crate::auth::Role;
use crate::capabilities::TripCapabilities;
use cavebook_domain::{
    EventType, SignupBoundary, SignupStatus, SkillCategory, StockStatus, Trip, User, Variation,
    VariationAvailability, parse_wall_clock,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Metadata flags arrive as `"yes"`/`"no"`, booleans, `1`/`0` or null.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Number(n)) => n != 0,
        Some(Flag::Text(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "true" | "1" | "on"
        ),
        None => false,
    })
}

/// Free-text fields that the backend sometimes sends as numbers.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Option::<Text>::deserialize(deserializer)? {
        Some(Text::Text(s)) => s,
        Some(Text::Integer(n)) => n.to_string(),
        Some(Text::Float(n)) => n.to_string(),
        None => String::new(),
    })
}

fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = deserialize_text(deserializer)?;
    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

/// Custom fields attached to a trip product.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TripMeta {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub event_type: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub event_start_date_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub event_finish_date_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub event_allow_early_signup: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub event_allow_late_signup: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub event_non_members_welcome: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub event_must_caved_with_us_before: bool,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub event_trip_leader: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub event_members_discount: Option<String>,
}

/// A variation as returned by the store API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VariationRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub sku: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub price: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub stock_status: String,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
}

impl From<VariationRecord> for Variation {
    fn from(record: VariationRecord) -> Self {
        Self {
            variation_id: record.id,
            sku: record.sku,
            price: record.price,
            stock_status: StockStatus::parse(&record.stock_status),
            stock_quantity: record.stock_quantity,
        }
    }
}

/// A trip product as returned by the store API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default)]
    pub acf: TripMeta,
    #[serde(default)]
    pub variations: Vec<VariationRecord>,
}

impl TripRecord {
    /// Decodes a trip record from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MalformedPayload` if the JSON does not have the
    /// record's shape.
    pub fn from_json(json: &str) -> Result<Self, crate::ApiError> {
        serde_json::from_str(json).map_err(|e| crate::ApiError::MalformedPayload {
            payload: String::from("trip"),
            message: e.to_string(),
        })
    }

    /// Converts the record into a domain trip.
    ///
    /// Unparseable dates are dropped (with a warning) rather than rejected;
    /// identifying fields are checked later by `validate_trip`.
    #[must_use]
    pub fn into_trip(self) -> Trip {
        let start = parse_optional_date(
            self.id,
            "event_start_date_time",
            self.acf.event_start_date_time.as_deref(),
        );
        let finish = parse_optional_date(
            self.id,
            "event_finish_date_time",
            self.acf.event_finish_date_time.as_deref(),
        );

        Trip {
            trip_id: self.id,
            name: self.name,
            event_type: EventType::parse(&self.acf.event_type),
            start,
            finish,
            allow_early_signup: self.acf.event_allow_early_signup,
            allow_late_signup: self.acf.event_allow_late_signup,
            non_members_welcome: self.acf.event_non_members_welcome,
            must_caved_with_us_before: self.acf.event_must_caved_with_us_before,
            leaders: self.acf.event_trip_leader,
            members_discount: self.acf.event_members_discount,
            variations: self.variations.into_iter().map(Variation::from).collect(),
        }
    }
}

fn parse_optional_date(
    trip_id: u64,
    field: &str,
    value: Option<&str>,
) -> Option<chrono::NaiveDateTime> {
    let value = value?;
    match parse_wall_clock(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(trip_id, field, "Ignoring malformed trip date: {e}");
            None
        }
    }
}

/// The current user as supplied by the session layer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserRecord {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub is_member: bool,
    #[serde(default)]
    pub is_committee_member: bool,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub last_name: String,
    #[serde(default)]
    pub skills: BTreeMap<String, String>,
    #[serde(default)]
    pub purchased_product_ids: Vec<u64>,
}

impl UserRecord {
    /// Decodes a user record from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MalformedPayload` if the JSON does not have the
    /// record's shape.
    pub fn from_json(json: &str) -> Result<Self, crate::ApiError> {
        serde_json::from_str(json).map_err(|e| crate::ApiError::MalformedPayload {
            payload: String::from("user"),
            message: e.to_string(),
        })
    }

    /// Converts the record into a domain user. Unknown skill categories are dropped.
    #[must_use]
    pub fn into_user(self) -> User {
        let mut skills = BTreeMap::new();
        for (key, label) in self.skills {
            match SkillCategory::parse(&key) {
                Some(category) => {
                    skills.insert(category, label);
                }
                None => warn!(category = %key, "Ignoring unknown skill category"),
            }
        }

        User {
            is_logged_in: self.is_logged_in,
            membership: self.is_member,
            committee: self.is_committee_member,
            first_name: self.first_name,
            last_name: self.last_name,
            skills,
            purchases: self.purchased_product_ids.into_iter().collect(),
        }
    }
}

/// Signup window in the report. Boundaries are RFC 3339 in the engine's zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupTimingResponse {
    /// When signup opens, absent without a start date.
    pub opens_at: Option<String>,
    /// When signup closes, absent without a start date.
    pub closes_at: Option<String>,
    /// Phase at the evaluation instant.
    pub status: SignupStatus,
    /// Shorthand for `status == open`.
    pub is_open: bool,
    /// The boundary the countdown runs to.
    pub next_transition: Option<SignupBoundary>,
    /// Time left until `next_transition`, e.g. `"2d 3h 0m 5s"`.
    pub countdown: Option<String>,
}

/// One variation in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationResponse {
    /// Variation identifier.
    pub variation_id: u64,
    /// Stock keeping unit.
    pub sku: String,
    /// Base price, 0 when the stored price is not a number.
    pub price: f64,
    /// Price after the trip's member discount.
    pub member_price: f64,
    /// Whether this user can pick it.
    pub availability: VariationAvailability,
}

/// Everything the trip page needs to know about one user and one trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    /// The evaluated trip.
    pub trip_id: u64,
    /// Zone the signup boundaries are expressed in.
    pub timezone: String,
    /// Signup window and countdown.
    pub signup: SignupTimingResponse,
    /// The user's club-wide role.
    pub role: Role,
    /// The user's role on this trip.
    pub trip_role: Role,
    /// Whether the user is named as a leader.
    pub is_trip_leader: bool,
    /// Whether the user already bought a place.
    pub has_signed_up: bool,
    /// What the user may do on this trip.
    pub capabilities: TripCapabilities,
    /// Every variation in trip order.
    pub variations: Vec<VariationResponse>,
    /// The ticket to preselect.
    pub default_variation_id: Option<u64>,
}
