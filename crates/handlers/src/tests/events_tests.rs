// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::events::{BookingChange, BookingDocument};
use rota_domain::BookingStatus;

#[test]
fn test_full_document_deserializes() {
    let payload = r#"{
        "id": "b-1",
        "user_id": "u-1",
        "shift_id": "s-1",
        "status": "upcoming",
        "start_time": 1000,
        "end_time": 2000,
        "reward_points": 10
    }"#;

    let document: BookingDocument = serde_json::from_str(payload).unwrap();

    assert_eq!(document.id, "b-1");
    assert_eq!(document.booking_status(), Some(BookingStatus::Upcoming));
    assert_eq!(document.start_time, Some(1_000));
    assert_eq!(document.reward_points, Some(10));
}

#[test]
fn test_sparse_document_deserializes_with_absent_fields() {
    // The source is schemaless: everything but the id may be missing.
    let payload = r#"{"id": "b-1"}"#;

    let document: BookingDocument = serde_json::from_str(payload).unwrap();

    assert_eq!(document.id, "b-1");
    assert_eq!(document.user_id, None);
    assert_eq!(document.shift_id, None);
    assert_eq!(document.booking_status(), None);
    assert_eq!(document.start_time, None);
}

#[test]
fn test_change_payload_carries_before_and_after() {
    let payload = r#"{
        "before": {"id": "b-1", "user_id": "u-1", "status": "upcoming"},
        "after": {"id": "b-1", "user_id": "u-1", "status": "cancelled"}
    }"#;

    let change: BookingChange = serde_json::from_str(payload).unwrap();

    assert_eq!(change.before.booking_status(), Some(BookingStatus::Upcoming));
    assert_eq!(change.after.booking_status(), Some(BookingStatus::Cancelled));
}

#[test]
fn test_unstorable_document_converts_to_none() {
    let no_owner = BookingDocument {
        id: "b-1".to_string(),
        user_id: None,
        shift_id: Some("s-1".to_string()),
        status: None,
        start_time: None,
        end_time: None,
        reward_points: None,
    };
    assert!(no_owner.to_booking().is_none());

    let negative_reward = BookingDocument {
        reward_points: Some(-5),
        user_id: Some("u-1".to_string()),
        ..no_owner
    };
    assert!(negative_reward.to_booking().is_none());
}

#[test]
fn test_storable_document_converts_to_upcoming_booking() {
    let document = BookingDocument {
        id: "b-1".to_string(),
        user_id: Some("u-1".to_string()),
        shift_id: Some("s-1".to_string()),
        status: Some("upcoming".to_string()),
        start_time: Some(1_000),
        end_time: Some(2_000),
        reward_points: Some(10),
    };

    let booking = document.to_booking().unwrap();

    assert_eq!(booking.id.value(), "b-1");
    assert_eq!(booking.user_id.value(), "u-1");
    assert_eq!(booking.status, BookingStatus::Upcoming);
    assert!(!booking.admitted);
    assert!(!booking.penalized);
}
