// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::competency::SkillCategory;
use crate::error::DomainError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The kind of trip, which drives the signup window rules.
///
/// Unknown event types from the backend are folded into `Other` rather
/// than rejected; they get the default signup window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Weekend or multi-day trip with accommodation.
    Overnight,
    /// Day trip to a named cave.
    Known,
    /// Day trip whose destination is announced late.
    Mystery,
    /// Club membership product.
    Membership,
    /// Skills training session.
    Training,
    /// Introductory trip for newcomers.
    #[serde(rename = "giggletrip")]
    GiggleTrip,
    /// Anything else.
    #[default]
    Other,
}

impl EventType {
    /// Parses an event type tag.
    ///
    /// Matching is case-insensitive and total: unrecognized or empty tags
    /// resolve to `EventType::Other`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "overnight" => Self::Overnight,
            "known" => Self::Known,
            "mystery" => Self::Mystery,
            "membership" => Self::Membership,
            "training" => Self::Training,
            "giggletrip" => Self::GiggleTrip,
            _ => Self::Other,
        }
    }

    /// Returns the backend tag for this event type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overnight => "overnight",
            Self::Known => "known",
            Self::Mystery => "mystery",
            Self::Membership => "membership",
            Self::Training => "training",
            Self::GiggleTrip => "giggletrip",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `WooCommerce` stock status of a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Available to buy.
    #[serde(rename = "instock")]
    InStock,
    /// Sold out.
    #[serde(rename = "outofstock")]
    OutOfStock,
    /// Orderable but not in stock.
    #[serde(rename = "onbackorder")]
    OnBackorder,
    /// Missing or unrecognized status.
    #[default]
    Unknown,
}

impl StockStatus {
    /// Parses a `WooCommerce` stock status tag (`instock`, `outofstock`, `onbackorder`).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "instock" => Self::InStock,
            "outofstock" => Self::OutOfStock,
            "onbackorder" => Self::OnBackorder,
            _ => Self::Unknown,
        }
    }

    /// Returns the backend tag for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "instock",
            Self::OutOfStock => "outofstock",
            Self::OnBackorder => "onbackorder",
            Self::Unknown => "unknown",
        }
    }
}

/// A purchasable sub-option of a trip (e.g. member or non-member ticket).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// The `WooCommerce` variation identifier.
    pub variation_id: u64,
    /// Stock keeping unit. May be empty.
    pub sku: String,
    /// Base price as sent by the backend (free text, usually decimal).
    pub price: String,
    /// Stock status.
    pub stock_status: StockStatus,
    /// Remaining stock, if the backend manages stock for this variation.
    pub stock_quantity: Option<i64>,
}

impl Variation {
    /// Creates a new in-stock `Variation`.
    ///
    /// # Arguments
    ///
    /// * `variation_id` - The variation identifier
    /// * `sku` - The stock keeping unit
    /// * `price` - The base price text
    /// * `stock_quantity` - Remaining stock
    #[must_use]
    pub fn new(variation_id: u64, sku: &str, price: &str, stock_quantity: i64) -> Self {
        Self {
            variation_id,
            sku: sku.to_string(),
            price: price.to_string(),
            stock_status: StockStatus::InStock,
            stock_quantity: Some(stock_quantity),
        }
    }

    /// Returns true if the variation is in stock with a positive quantity.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_status == StockStatus::InStock && self.stock_quantity.is_some_and(|q| q > 0)
    }
}

/// A bookable caving event.
///
/// Trips are read-only projections of `WooCommerce` products; nothing in
/// this crate mutates them after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// The product identifier.
    pub trip_id: u64,
    /// The product name.
    pub name: String,
    /// The event type.
    pub event_type: EventType,
    /// Start, as local wall-clock time.
    pub start: Option<NaiveDateTime>,
    /// Finish, as local wall-clock time.
    pub finish: Option<NaiveDateTime>,
    /// Signup opens immediately regardless of event type.
    pub allow_early_signup: bool,
    /// Signup never closes regardless of event type.
    pub allow_late_signup: bool,
    /// Non-members may buy a place.
    pub non_members_welcome: bool,
    /// Only people who have been on a club trip before should sign up.
    pub must_caved_with_us_before: bool,
    /// Free-text, comma-separated leader names.
    pub leaders: String,
    /// Free-text member discount applied to variation prices.
    pub members_discount: Option<String>,
    /// Purchasable variations.
    pub variations: Vec<Variation>,
}

impl Trip {
    /// Creates a new `Trip` with no schedule, no flags and no variations.
    ///
    /// # Arguments
    ///
    /// * `trip_id` - The product identifier
    /// * `name` - The product name
    /// * `event_type` - The event type
    #[must_use]
    pub fn new(trip_id: u64, name: &str, event_type: EventType) -> Self {
        Self {
            trip_id,
            name: name.to_string(),
            event_type,
            start: None,
            finish: None,
            allow_early_signup: false,
            allow_late_signup: false,
            non_members_welcome: false,
            must_caved_with_us_before: false,
            leaders: String::new(),
            members_discount: None,
            variations: Vec::new(),
        }
    }

    /// Returns the leader names, trimmed, with empty entries dropped.
    pub fn leader_names(&self) -> impl Iterator<Item = &str> {
        self.leaders
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Looks up a variation by identifier.
    #[must_use]
    pub fn variation(&self, variation_id: u64) -> Option<&Variation> {
        self.variations
            .iter()
            .find(|v| v.variation_id == variation_id)
    }
}

/// A website user as seen by the eligibility rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    /// Whether the user has an authenticated session.
    pub is_logged_in: bool,
    /// Raw membership flag from the backend.
    pub membership: bool,
    /// Raw committee flag from the backend.
    pub committee: bool,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Free-text skill labels keyed by category.
    pub skills: BTreeMap<SkillCategory, String>,
    /// Trip and variation identifiers the user has bought.
    pub purchases: BTreeSet<u64>,
}

impl User {
    /// Creates a logged-out user with no data.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a logged-in user with the given name.
    ///
    /// # Arguments
    ///
    /// * `first_name` - First name
    /// * `last_name` - Last name
    #[must_use]
    pub fn logged_in(first_name: &str, last_name: &str) -> Self {
        Self {
            is_logged_in: true,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            ..Self::default()
        }
    }

    /// Returns true for a logged-in member.
    #[must_use]
    pub const fn is_member(&self) -> bool {
        self.is_logged_in && self.membership
    }

    /// Returns true for a logged-in committee member.
    #[must_use]
    pub const fn is_committee_member(&self) -> bool {
        self.is_logged_in && self.committee
    }

    /// Returns `"first last"` with whitespace collapsed and lowercased,
    /// or `None` when both names are blank.
    #[must_use]
    pub fn normalized_name(&self) -> Option<String> {
        let full = format!("{} {}", self.first_name, self.last_name);
        let normalized = normalize_name(&full);
        if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        }
    }

    /// Returns true if the user bought the trip or any of its variations.
    #[must_use]
    pub fn has_purchased(&self, trip: &Trip) -> bool {
        self.purchases.contains(&trip.trip_id)
            || trip
                .variations
                .iter()
                .any(|v| self.purchases.contains(&v.variation_id))
    }
}

/// Lowercases a display name and collapses runs of whitespace.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a backend date-time into local wall-clock time.
///
/// Accepted forms: `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD HH:MM` and `YYYY-MM-DD` (midnight).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if none of the forms match.
pub fn parse_wall_clock(s: &str) -> Result<NaiveDateTime, DomainError> {
    const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    let trimmed = s.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
        .map_err(|e| DomainError::DateParseError {
            date_string: s.to_string(),
            error: e.to_string(),
        })
}
