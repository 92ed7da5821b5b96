// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cavebook_domain::{
    EventType, SignupBoundary, SignupStatus, SignupTiming, Trip, User, VariationAvailability,
};

use super::helpers::{
    create_test_giggle_trip, create_test_guest, create_test_leader, create_test_member,
    create_test_trip, utc, wall_clock,
};
use crate::{
    AccessLevel, ApiError, EligibilityEngine, EligibilityReport, EngineConfig, Role,
    SignupTimingResponse, TripRecord, UserRecord, parse_access_level,
};

#[test]
fn test_now_is_converted_to_local_time() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let trip: Trip = create_test_trip();

    // 22:30 UTC on April 3 is 23:30 BST, half an hour before opening.
    let before: SignupTiming = engine.compute_signup_timing(&trip, utc(2026, 4, 3, 22, 30));
    assert_eq!(before.status, SignupStatus::Early);
    assert_eq!(before.opens_at, Some(wall_clock(2026, 4, 4, 0, 0)));

    let at_open: SignupTiming = engine.compute_signup_timing(&trip, utc(2026, 4, 3, 23, 0));
    assert_eq!(at_open.status, SignupStatus::Open);
}

#[test]
fn test_timing_response_carries_offsets_and_countdown() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let response: SignupTimingResponse =
        engine.timing_response(&create_test_trip(), utc(2026, 4, 3, 22, 30));

    assert_eq!(response.opens_at.as_deref(), Some("2026-04-04T00:00:00+01:00"));
    assert_eq!(response.closes_at.as_deref(), Some("2026-05-15T12:00:00+01:00"));
    assert_eq!(response.status, SignupStatus::Early);
    assert!(!response.is_open);
    assert_eq!(response.next_transition, Some(SignupBoundary::Opens));
    assert_eq!(response.countdown.as_deref(), Some("30m 0s"));
}

#[test]
fn test_timing_response_without_start() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let trip: Trip = Trip::new(9, "Date to be announced", EventType::Overnight);
    let response: SignupTimingResponse = engine.timing_response(&trip, utc(2026, 1, 1, 0, 0));

    assert_eq!(response.opens_at, None);
    assert_eq!(response.closes_at, None);
    assert_eq!(response.status, SignupStatus::Closed);
    assert_eq!(response.countdown, None);
}

#[test]
fn test_wall_clock_in_dst_gap_moves_forward() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let mut trip: Trip = Trip::new(10, "Night trip", EventType::Other);
    // One month before is 01:30 on 2026-03-29, which does not exist in London.
    trip.start = Some(wall_clock(2026, 4, 29, 1, 30));

    let response: SignupTimingResponse = engine.timing_response(&trip, utc(2026, 3, 1, 0, 0));
    assert_eq!(response.opens_at.as_deref(), Some("2026-03-29T02:30:00+01:00"));
}

#[test]
fn test_configured_timezone_is_used() {
    let config: EngineConfig = EngineConfig::default().with_timezone("Asia/Tokyo");
    let engine: EligibilityEngine = EligibilityEngine::new(config).unwrap();
    let response: SignupTimingResponse =
        engine.timing_response(&create_test_trip(), utc(2026, 4, 3, 14, 59));

    assert_eq!(response.opens_at.as_deref(), Some("2026-04-04T00:00:00+09:00"));
    assert_eq!(response.status, SignupStatus::Early);
    assert_eq!(response.countdown.as_deref(), Some("1m 0s"));
}

#[test]
fn test_invalid_timezone_is_rejected() {
    let config: EngineConfig = EngineConfig::default().with_timezone("Yorkshire/Dales");
    assert!(EligibilityEngine::new(config).is_err());
}

#[test]
fn test_evaluate_member_on_open_trip() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let report: EligibilityReport = engine
        .evaluate(
            &create_test_trip(),
            &create_test_member(),
            AccessLevel::LoggedIn,
            utc(2026, 5, 1, 12, 0),
        )
        .unwrap();

    assert_eq!(report.trip_id, 501);
    assert_eq!(report.timezone, "Europe/London");
    assert!(report.signup.is_open);
    assert_eq!(report.signup.next_transition, Some(SignupBoundary::Closes));
    assert_eq!(report.role, Role::Member);
    assert_eq!(report.trip_role, Role::Member);
    assert!(!report.is_trip_leader);
    assert!(!report.has_signed_up);
    assert!(report.capabilities.can_purchase_trip.is_allowed());
    assert!(!report.capabilities.can_edit_trip.is_allowed());

    assert_eq!(report.variations.len(), 2);
    assert_eq!(report.variations[0].variation_id, 502);
    assert!((report.variations[0].price - 20.0).abs() < f64::EPSILON);
    assert!((report.variations[0].member_price - 15.0).abs() < f64::EPSILON);
    assert_eq!(report.variations[0].availability, VariationAvailability::Selectable);
    assert_eq!(report.variations[1].availability, VariationAvailability::OutOfStock);
    assert_eq!(report.default_variation_id, Some(502));
}

#[test]
fn test_evaluate_leader() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let mut leader: User = create_test_leader();
    leader.purchases.insert(502);

    let report: EligibilityReport = engine
        .evaluate(
            &create_test_trip(),
            &leader,
            AccessLevel::Participant,
            utc(2026, 5, 1, 12, 0),
        )
        .unwrap();

    assert!(report.is_trip_leader);
    assert!(report.has_signed_up);
    assert_eq!(report.role, Role::Member);
    assert_eq!(report.trip_role, Role::TripLeader);
    assert!(report.capabilities.can_edit_trip.is_allowed());
    assert!(report.capabilities.can_view_sensitive_info.is_allowed());
}

#[test]
fn test_evaluate_giggle_trip_hides_bca_ticket_from_members() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let trip: Trip = create_test_giggle_trip();
    let now = utc(2026, 6, 1, 12, 0);

    let member: EligibilityReport = engine
        .evaluate(&trip, &create_test_member(), AccessLevel::LoggedIn, now)
        .unwrap();
    assert_eq!(member.variations[0].availability, VariationAvailability::Excluded);
    assert_eq!(member.default_variation_id, Some(603));

    for user in [User::anonymous(), create_test_guest()] {
        let report: EligibilityReport = engine
            .evaluate(&trip, &user, AccessLevel::Public, now)
            .unwrap();
        assert_eq!(report.variations[0].availability, VariationAvailability::Selectable);
        assert_eq!(report.default_variation_id, Some(602));
        assert!(report.capabilities.can_purchase_trip.is_allowed());
    }
}

#[test]
fn test_engine_without_rules_shows_all_tickets() {
    let config: EngineConfig = EngineConfig {
        exclusion_rules: Vec::new(),
        ..EngineConfig::default()
    };
    let engine: EligibilityEngine = EligibilityEngine::new(config).unwrap();
    let trip: Trip = create_test_giggle_trip();

    assert_eq!(
        engine
            .selectable_variations(&trip, &create_test_member())
            .len(),
        2
    );
}

#[test]
fn test_evaluate_rejects_unidentifiable_trip() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let mut trip: Trip = create_test_trip();
    trip.name = String::new();

    let result = engine.evaluate(
        &trip,
        &create_test_member(),
        AccessLevel::LoggedIn,
        utc(2026, 5, 1, 12, 0),
    );
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));
}

#[test]
fn test_evaluate_records_with_unknown_access_level() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let trip: TripRecord = TripRecord::from_json(
        r#"{ "id": 700, "name": "Mystery trip", "acf": { "event_type": "mystery" } }"#,
    )
    .unwrap();
    let user: UserRecord = UserRecord::default();

    let report: EligibilityReport = engine
        .evaluate_records(trip, user, "wizard", utc(2026, 1, 1, 0, 0))
        .unwrap();

    assert_eq!(report.role, Role::Guest);
    assert_eq!(report.signup.status, SignupStatus::Closed);
    assert!(!report.capabilities.can_view_participant_details.is_allowed());
}

#[test]
fn test_parse_access_level_fallback() {
    assert_eq!(parse_access_level("event_role"), AccessLevel::EventRole);
    assert_eq!(parse_access_level(""), AccessLevel::Public);
    assert_eq!(parse_access_level("ADMIN"), AccessLevel::Public);
}

#[test]
fn test_duplicate_variation_is_a_rule_violation() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let mut trip: Trip = create_test_trip();
    let duplicate = trip.variations[0].clone();
    trip.variations.push(duplicate);

    let result = engine.evaluate(
        &trip,
        &create_test_member(),
        AccessLevel::LoggedIn,
        utc(2026, 5, 1, 12, 0),
    );
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_variation"
    ));
}

#[test]
fn test_report_serializes_capabilities_as_booleans() {
    let engine: EligibilityEngine = EligibilityEngine::default();
    let report: EligibilityReport = engine
        .evaluate(
            &create_test_trip(),
            &create_test_member(),
            AccessLevel::LoggedIn,
            utc(2026, 5, 1, 12, 0),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();

    assert_eq!(json["capabilities"]["can_purchase_trip"], serde_json::json!(true));
    assert_eq!(json["capabilities"]["can_edit_trip"], serde_json::json!(false));
    assert_eq!(json["signup"]["status"], serde_json::json!("open"));
    assert_eq!(json["role"], serde_json::json!("member"));
}
