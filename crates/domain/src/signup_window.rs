// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Signup window calculation for trips.
//!
//! This module calculates when signup for a trip opens and closes based on:
//! - The trip's event type
//! - The trip's start (local wall-clock time)
//! - The early/late signup override flags
//!
//! ## Invariants
//!
//! - All arithmetic is on local wall-clock date-times; callers convert
//!   the current instant into the same zone before asking for a status
//! - `opens_at <= closes_at` for every trip with a start
//! - Status is a pure function of `(now, opens_at, closes_at)`
//! - A trip without a start has no window and is always `Closed`
//!
//! ## Window Rules
//!
//! | event type            | opens                                        | closes                                      |
//! |-----------------------|----------------------------------------------|---------------------------------------------|
//! | overnight             | Sunday at/before start - 2 months, 20:00     | Sunday at/before start - 7 days, 20:00      |
//! | known, mystery        | start - 42 days, 00:00                       | start - 1 day, 12:00                        |
//! | membership            | epoch                                        | far future                                  |
//! | training, giggletrip  | epoch                                        | start - 1 day, 12:00                        |
//! | other                 | start - 1 month                              | start - 1 day, 12:00                        |
//!
//! Overnight signup closes on the Sunday a week before the trip, not a week
//! before the opening Sunday, which would precede the opening.

use crate::types::{EventType, Trip};
use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Opening boundary used for trips that are always open.
pub const SIGNUP_EPOCH: NaiveDateTime = wall_clock(1970, 1, 1, 0, 0);

/// Closing boundary used for trips that never close.
pub const SIGNUP_FAR_FUTURE: NaiveDateTime = wall_clock(9999, 12, 31, 23, 59);

const NOON: NaiveTime = time_of_day(12, 0);
const EVENING: NaiveTime = time_of_day(20, 0);

const fn time_of_day(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(t) => t,
        None => NaiveTime::MIN,
    }
}

const fn wall_clock(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => NaiveDateTime::new(date, time_of_day(hour, minute)),
        None => NaiveDateTime::MIN,
    }
}

/// The phase of a trip's signup window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStatus {
    /// Signup has not opened yet.
    Early,
    /// Signup is open.
    Open,
    /// Signup has closed.
    Late,
    /// The trip has no signup window at all.
    Closed,
}

impl SignupStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Open => "open",
            Self::Late => "late",
            Self::Closed => "closed",
        }
    }
}

/// Which boundary of the window comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupBoundary {
    /// Signup opening.
    Opens,
    /// Signup closing.
    Closes,
}

/// The signup window of a trip evaluated at a point in time.
///
/// Never persisted; recomputed from the trip on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupTiming {
    /// When signup opens (local wall-clock), `None` if the trip has no start.
    pub opens_at: Option<NaiveDateTime>,
    /// When signup closes (local wall-clock), `None` if the trip has no start.
    pub closes_at: Option<NaiveDateTime>,
    /// Phase at the evaluation instant.
    pub status: SignupStatus,
}

impl SignupTiming {
    /// A timing with no window.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            opens_at: None,
            closes_at: None,
            status: SignupStatus::Closed,
        }
    }

    /// Returns true if signup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == SignupStatus::Open
    }

    /// Evaluates the phase of this window at another instant.
    #[must_use]
    pub fn status_at(&self, now: NaiveDateTime) -> SignupStatus {
        match (self.opens_at, self.closes_at) {
            (Some(opens_at), Some(closes_at)) => status_for(now, opens_at, closes_at),
            _ => SignupStatus::Closed,
        }
    }

    /// Returns the next boundary and the time remaining until it.
    ///
    /// `None` once signup has closed, for trips without a window, and for
    /// open windows that never close.
    #[must_use]
    pub fn next_transition(&self, now: NaiveDateTime) -> Option<(SignupBoundary, Duration)> {
        let opens_at = self.opens_at?;
        let closes_at = self.closes_at?;

        match status_for(now, opens_at, closes_at) {
            SignupStatus::Early => Some((SignupBoundary::Opens, opens_at - now)),
            SignupStatus::Open if closes_at < SIGNUP_FAR_FUTURE => {
                Some((SignupBoundary::Closes, closes_at - now))
            }
            _ => None,
        }
    }
}

/// Calculates the signup window for a trip.
///
/// # Arguments
///
/// * `trip` - The trip
/// * `now` - The evaluation instant as local wall-clock time
///
/// # Returns
///
/// The trip's window and its phase at `now`. Trips without a start, or
/// whose start is too close to the calendar limits to do date arithmetic
/// on, get `SignupTiming::closed()`.
#[must_use]
pub fn calculate_signup_timing(trip: &Trip, now: NaiveDateTime) -> SignupTiming {
    let Some(start) = trip.start else {
        return SignupTiming::closed();
    };

    let Some((mut opens_at, mut closes_at)) = window_for_event_type(trip.event_type, start) else {
        return SignupTiming::closed();
    };

    if trip.allow_early_signup {
        opens_at = SIGNUP_EPOCH;
    }
    if trip.allow_late_signup {
        closes_at = SIGNUP_FAR_FUTURE;
    }

    SignupTiming {
        opens_at: Some(opens_at),
        closes_at: Some(closes_at),
        status: status_for(now, opens_at, closes_at),
    }
}

/// Looks up the un-overridden window for an event type.
fn window_for_event_type(
    event_type: EventType,
    start: NaiveDateTime,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let day_before_noon = || Some(start.date().checked_sub_days(Days::new(1))?.and_time(NOON));

    match event_type {
        EventType::Overnight => {
            let opens_from = start.date().checked_sub_months(Months::new(2))?;
            let closes_from = start.date().checked_sub_days(Days::new(7))?;
            Some((
                most_recent_sunday(opens_from)?.and_time(EVENING),
                most_recent_sunday(closes_from)?.and_time(EVENING),
            ))
        }
        EventType::Known | EventType::Mystery => {
            let opens_at = start
                .date()
                .checked_sub_days(Days::new(42))?
                .and_time(NaiveTime::MIN);
            Some((opens_at, day_before_noon()?))
        }
        EventType::Membership => Some((SIGNUP_EPOCH, SIGNUP_FAR_FUTURE)),
        EventType::Training | EventType::GiggleTrip => Some((SIGNUP_EPOCH, day_before_noon()?)),
        EventType::Other => {
            let opens_at = start.checked_sub_months(Months::new(1))?;
            Some((opens_at, day_before_noon()?))
        }
    }
}

/// Rounds a date back to the most recent Sunday, inclusive.
fn most_recent_sunday(date: NaiveDate) -> Option<NaiveDate> {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back))
}

fn status_for(now: NaiveDateTime, opens_at: NaiveDateTime, closes_at: NaiveDateTime) -> SignupStatus {
    if now < opens_at {
        SignupStatus::Early
    } else if now > closes_at {
        SignupStatus::Late
    } else {
        SignupStatus::Open
    }
}

/// Renders a countdown as `"{d}d {h}h {m}m {s}s"`.
///
/// Leading zero units are omitted; non-positive durations render as `"0s"`.
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds();
    if total <= 0 {
        return String::from("0s");
    }

    let units = [
        (total / 86_400, "d"),
        ((total % 86_400) / 3_600, "h"),
        ((total % 3_600) / 60, "m"),
        (total % 60, "s"),
    ];

    units
        .iter()
        .skip_while(|(value, _)| *value == 0)
        .map(|(value, suffix)| format!("{value}{suffix}"))
        .collect::<Vec<_>>()
        .join(" ")
}
