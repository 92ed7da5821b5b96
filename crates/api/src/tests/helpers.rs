// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use cavebook_domain::{EventType, Trip, User, Variation};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub fn wall_clock(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

pub fn create_test_trip() -> Trip {
    let mut trip: Trip = Trip::new(501, "Dan yr Ogof", EventType::Known);
    trip.start = Some(wall_clock(2026, 5, 16, 9, 30));
    trip.leaders = String::from("Tim Jones, Judith Smith");
    trip.members_discount = Some(String::from("5"));
    trip.variations = vec![
        Variation::new(502, "DYO-MEMBER", "20", 8),
        Variation::new(503, "DYO-GUEST", "25", 0),
    ];
    trip
}

pub fn create_test_giggle_trip() -> Trip {
    let mut trip: Trip = Trip::new(601, "Goatchurch giggle", EventType::GiggleTrip);
    trip.start = Some(wall_clock(2026, 6, 20, 10, 0));
    trip.non_members_welcome = true;
    trip.variations = vec![
        Variation::new(602, "GIGGLE-BCA_MEMBER", "10", 5),
        Variation::new(603, "GIGGLE-STANDARD", "15", 5),
    ];
    trip
}

pub fn create_test_guest() -> User {
    User::logged_in("Bob", "Sump")
}

pub fn create_test_member() -> User {
    let mut user: User = User::logged_in("Ada", "Pot");
    user.membership = true;
    user
}

pub fn create_test_committee_member() -> User {
    let mut user: User = create_test_member();
    user.committee = true;
    user
}

pub fn create_test_leader() -> User {
    let mut user: User = User::logged_in("tim", "jones");
    user.membership = true;
    user
}
