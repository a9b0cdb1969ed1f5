// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_store, seed_booking, seed_shift, seed_user};
use crate::{AdmissionRecord, BatchOutcome, MAX_BATCH_WRITES, PenaltyRecord, Persistence};
use rota::CompletionStaging;
use rota_domain::{
    Booking, BookingId, BookingStatus, Shift, ShiftId, ShiftStatus, Timestamp, User, UserDelta,
    UserId,
};

#[test]
fn test_shift_round_trip() {
    let mut store: Persistence = create_test_store();
    let shift: Shift = seed_shift(&mut store, "shift-1", 3);

    let fetched: Option<Shift> = store.get_shift(&ShiftId::new("shift-1")).unwrap();

    assert_eq!(fetched, Some(shift));
}

#[test]
fn test_missing_records_read_as_none() {
    let mut store: Persistence = create_test_store();

    assert_eq!(store.get_shift(&ShiftId::new("nope")).unwrap(), None);
    assert_eq!(store.get_user(&UserId::new("nope")).unwrap(), None);
    assert_eq!(store.get_booking(&BookingId::new("nope")).unwrap(), None);
}

#[test]
fn test_booking_insert_is_replay_safe() {
    let mut store: Persistence = create_test_store();
    let booking: Booking = seed_booking(&mut store, "b-1", "u-1", "shift-1", Some(100), Some(5));

    // A redelivered creation event inserts the same id again.
    store.insert_booking(&booking).unwrap();

    let fetched: Option<Booking> = store.get_booking(&BookingId::new("b-1")).unwrap();
    assert_eq!(fetched, Some(booking));
}

#[test]
fn test_admit_booking_increments_and_derives_status() {
    let mut store: Persistence = create_test_store();
    seed_shift(&mut store, "shift-1", 2);
    seed_booking(&mut store, "b-1", "u-1", "shift-1", None, None);

    let record: AdmissionRecord = store
        .admit_booking(&BookingId::new("b-1"), &ShiftId::new("shift-1"))
        .unwrap();

    let AdmissionRecord::Admitted(shift) = record else {
        panic!("expected admission, got {record:?}");
    };
    assert_eq!(shift.booked_count, 1);
    assert_eq!(shift.status, ShiftStatus::Open);

    let stored: Shift = store.get_shift(&ShiftId::new("shift-1")).unwrap().unwrap();
    assert_eq!(stored.booked_count, 1);
    assert_eq!(stored.status, ShiftStatus::Open);
}

#[test]
fn test_admit_booking_closes_shift_at_capacity() {
    let mut store: Persistence = create_test_store();
    seed_shift(&mut store, "shift-1", 2);
    seed_booking(&mut store, "b-1", "u-1", "shift-1", None, None);
    seed_booking(&mut store, "b-2", "u-2", "shift-1", None, None);

    store
        .admit_booking(&BookingId::new("b-1"), &ShiftId::new("shift-1"))
        .unwrap();
    store
        .admit_booking(&BookingId::new("b-2"), &ShiftId::new("shift-1"))
        .unwrap();

    let stored: Shift = store.get_shift(&ShiftId::new("shift-1")).unwrap().unwrap();
    assert_eq!(stored.booked_count, 2);
    assert_eq!(stored.status, ShiftStatus::Closed);
}

#[test]
fn test_admit_booking_sets_marker_and_dedupes_redelivery() {
    let mut store: Persistence = create_test_store();
    seed_shift(&mut store, "shift-1", 5);
    seed_booking(&mut store, "b-1", "u-1", "shift-1", None, None);

    store
        .admit_booking(&BookingId::new("b-1"), &ShiftId::new("shift-1"))
        .unwrap();
    let replay: AdmissionRecord = store
        .admit_booking(&BookingId::new("b-1"), &ShiftId::new("shift-1"))
        .unwrap();

    assert_eq!(replay, AdmissionRecord::AlreadyAdmitted);
    let stored: Shift = store.get_shift(&ShiftId::new("shift-1")).unwrap().unwrap();
    assert_eq!(stored.booked_count, 1);

    let booking: Booking = store.get_booking(&BookingId::new("b-1")).unwrap().unwrap();
    assert!(booking.admitted);
}

#[test]
fn test_admit_booking_for_vanished_shift_is_a_noop() {
    let mut store: Persistence = create_test_store();
    seed_booking(&mut store, "b-1", "u-1", "ghost-shift", None, None);

    let record: AdmissionRecord = store
        .admit_booking(&BookingId::new("b-1"), &ShiftId::new("ghost-shift"))
        .unwrap();

    assert_eq!(record, AdmissionRecord::ShiftMissing);
    let booking: Booking = store.get_booking(&BookingId::new("b-1")).unwrap().unwrap();
    assert!(!booking.admitted);
}

#[test]
fn test_admit_untracked_booking_still_admits() {
    // The event may reference a booking document the store never saw;
    // capacity still moves, it just cannot be deduplicated later.
    let mut store: Persistence = create_test_store();
    seed_shift(&mut store, "shift-1", 2);

    let record: AdmissionRecord = store
        .admit_booking(&BookingId::new("untracked"), &ShiftId::new("shift-1"))
        .unwrap();

    assert!(matches!(record, AdmissionRecord::Admitted(_)));
    let stored: Shift = store.get_shift(&ShiftId::new("shift-1")).unwrap().unwrap();
    assert_eq!(stored.booked_count, 1);
}

#[test]
fn test_set_booking_status_enforces_forward_only_lifecycle() {
    let mut store: Persistence = create_test_store();
    seed_booking(&mut store, "b-1", "u-1", "shift-1", None, None);

    store
        .set_booking_status(&BookingId::new("b-1"), BookingStatus::Cancelled)
        .unwrap();

    // Terminal states never transition again.
    let reopen = store.set_booking_status(&BookingId::new("b-1"), BookingStatus::Upcoming);
    assert!(reopen.is_err());
    let complete = store.set_booking_status(&BookingId::new("b-1"), BookingStatus::Completed);
    assert!(complete.is_err());

    let stored: Booking = store.get_booking(&BookingId::new("b-1")).unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);
}

#[test]
fn test_set_booking_status_for_missing_booking_errors() {
    let mut store: Persistence = create_test_store();

    let result = store.set_booking_status(&BookingId::new("ghost"), BookingStatus::Cancelled);

    assert!(result.is_err());
}

#[test]
fn test_apply_user_delta_increments_in_place() {
    let mut store: Persistence = create_test_store();
    seed_user(&mut store, "u-1");

    let delta: UserDelta = UserDelta {
        reliability: -5,
        points: 10,
        late_cancellations: 1,
        shifts_completed: 2,
    };
    store.apply_user_delta(&UserId::new("u-1"), &delta).unwrap();
    store.apply_user_delta(&UserId::new("u-1"), &delta).unwrap();

    let user: User = store.get_user(&UserId::new("u-1")).unwrap().unwrap();
    assert_eq!(user.reliability, -10);
    assert_eq!(user.points, 20);
    assert_eq!(user.stats.late_cancellations, 2);
    assert_eq!(user.stats.shifts_completed, 4);
}

#[test]
fn test_apply_user_delta_for_missing_user_errors() {
    let mut store: Persistence = create_test_store();

    let result = store.apply_user_delta(&UserId::new("ghost"), &UserDelta::default());

    assert!(result.is_err());
}

#[test]
fn test_cancellation_penalty_applies_once() {
    let mut store: Persistence = create_test_store();
    seed_user(&mut store, "u-1");
    seed_booking(&mut store, "b-1", "u-1", "shift-1", None, None);
    let delta: UserDelta = rota::late_cancellation_penalty();

    let first: PenaltyRecord = store
        .apply_cancellation_penalty(&BookingId::new("b-1"), &UserId::new("u-1"), &delta)
        .unwrap();
    let replay: PenaltyRecord = store
        .apply_cancellation_penalty(&BookingId::new("b-1"), &UserId::new("u-1"), &delta)
        .unwrap();

    assert_eq!(first, PenaltyRecord::Penalized);
    assert_eq!(replay, PenaltyRecord::AlreadyPenalized);

    let user: User = store.get_user(&UserId::new("u-1")).unwrap().unwrap();
    assert_eq!(user.reliability, -5);
    assert_eq!(user.stats.late_cancellations, 1);
}

#[test]
fn test_cancellation_penalty_with_missing_owner_writes_nothing() {
    let mut store: Persistence = create_test_store();
    seed_booking(&mut store, "b-1", "ghost-user", "shift-1", None, None);
    let delta: UserDelta = rota::late_cancellation_penalty();

    let record: PenaltyRecord = store
        .apply_cancellation_penalty(&BookingId::new("b-1"), &UserId::new("ghost-user"), &delta)
        .unwrap();

    assert_eq!(record, PenaltyRecord::OwnerMissing);
    // The marker must not be consumed: nothing was applied.
    let booking: Booking = store.get_booking(&BookingId::new("b-1")).unwrap().unwrap();
    assert!(!booking.penalized);
}

#[test]
fn test_due_bookings_filters_status_and_due_time() {
    let mut store: Persistence = create_test_store();
    let now: Timestamp = Timestamp::from_unix(10_000);

    seed_booking(&mut store, "b-due", "u-1", "s-1", Some(9_000), None);
    seed_booking(&mut store, "b-future", "u-1", "s-1", Some(11_000), None);
    seed_booking(&mut store, "b-no-end", "u-1", "s-1", None, None);
    seed_booking(&mut store, "b-cancelled", "u-1", "s-1", Some(8_000), None);
    store
        .set_booking_status(&BookingId::new("b-cancelled"), BookingStatus::Cancelled)
        .unwrap();

    let due: Vec<Booking> = store.due_bookings(now, None, 50).unwrap();

    let ids: Vec<&str> = due.iter().map(|b| b.id.value()).collect();
    assert_eq!(ids, vec!["b-due"]);
}

#[test]
fn test_due_bookings_boundary_includes_exactly_due() {
    let mut store: Persistence = create_test_store();
    let now: Timestamp = Timestamp::from_unix(10_000);
    seed_booking(&mut store, "b-exact", "u-1", "s-1", Some(10_000), None);

    let due: Vec<Booking> = store.due_bookings(now, None, 50).unwrap();

    assert_eq!(due.len(), 1);
}

#[test]
fn test_due_bookings_cursor_advances() {
    let mut store: Persistence = create_test_store();
    let now: Timestamp = Timestamp::from_unix(10_000);
    seed_booking(&mut store, "b-1", "u-1", "s-1", Some(1_000), None);
    seed_booking(&mut store, "b-2", "u-1", "s-1", Some(1_000), None);
    seed_booking(&mut store, "b-3", "u-1", "s-1", Some(1_000), None);

    let first_page: Vec<Booking> = store.due_bookings(now, None, 2).unwrap();
    assert_eq!(first_page.len(), 2);

    let cursor: BookingId = first_page.last().unwrap().id.clone();
    let second_page: Vec<Booking> = store.due_bookings(now, Some(&cursor), 2).unwrap();

    let ids: Vec<&str> = second_page.iter().map(|b| b.id.value()).collect();
    assert_eq!(ids, vec!["b-3"]);
}

#[test]
fn test_commit_completions_finalizes_and_credits() {
    let mut store: Persistence = create_test_store();
    let now: Timestamp = Timestamp::from_unix(10_000);
    seed_user(&mut store, "u-1");
    let booking: Booking = seed_booking(&mut store, "b-1", "u-1", "s-1", Some(9_000), Some(10));

    let staging: CompletionStaging = rota::stage_completion(&booking, now).unwrap();
    let outcome: BatchOutcome = store.commit_completions(&[staging]).unwrap();

    assert_eq!(outcome.completed, 1);
    assert_eq!(outcome.skipped_missing_owner, 0);
    assert_eq!(outcome.skipped_already_final, 0);

    let stored: Booking = store.get_booking(&BookingId::new("b-1")).unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Completed);
    assert_eq!(stored.completed_at, Some(now));

    let user: User = store.get_user(&UserId::new("u-1")).unwrap().unwrap();
    assert_eq!(user.points, 10);
    assert_eq!(user.stats.shifts_completed, 1);
}

#[test]
fn test_commit_completions_skips_already_finalized_bookings() {
    let mut store: Persistence = create_test_store();
    let now: Timestamp = Timestamp::from_unix(10_000);
    seed_user(&mut store, "u-1");
    let booking: Booking = seed_booking(&mut store, "b-1", "u-1", "s-1", Some(9_000), Some(10));
    let staging: CompletionStaging = rota::stage_completion(&booking, now).unwrap();

    store.commit_completions(&[staging.clone()]).unwrap();
    // A concurrent pass staged the same booking before the first commit
    // landed; the status guard makes the replay a no-op.
    let outcome: BatchOutcome = store.commit_completions(&[staging]).unwrap();

    assert_eq!(outcome.completed, 0);
    assert_eq!(outcome.skipped_already_final, 1);

    let user: User = store.get_user(&UserId::new("u-1")).unwrap().unwrap();
    assert_eq!(user.points, 10);
    assert_eq!(user.stats.shifts_completed, 1);
}

#[test]
fn test_commit_completions_skips_bookings_with_missing_owner() {
    let mut store: Persistence = create_test_store();
    let now: Timestamp = Timestamp::from_unix(10_000);
    let booking: Booking =
        seed_booking(&mut store, "b-1", "ghost-user", "s-1", Some(9_000), Some(10));
    let staging: CompletionStaging = rota::stage_completion(&booking, now).unwrap();

    let outcome: BatchOutcome = store.commit_completions(&[staging]).unwrap();

    assert_eq!(outcome.completed, 0);
    assert_eq!(outcome.skipped_missing_owner, 1);

    // Nothing was written: the booking stays upcoming and due.
    let stored: Booking = store.get_booking(&BookingId::new("b-1")).unwrap().unwrap();
    assert_eq!(stored.status, BookingStatus::Upcoming);
    assert_eq!(stored.completed_at, None);
}

#[test]
fn test_commit_completions_rejects_oversized_batches() {
    let mut store: Persistence = create_test_store();
    let staging: CompletionStaging = CompletionStaging {
        booking_id: BookingId::new("b-1"),
        user_id: UserId::new("u-1"),
        completed_at: Timestamp::from_unix(10_000),
        credit: rota::completion_credit(None),
    };
    let oversized: Vec<CompletionStaging> =
        vec![staging; MAX_BATCH_WRITES / 2 + 1];

    let result = store.commit_completions(&oversized);

    assert!(matches!(
        result,
        Err(crate::PersistenceError::BatchTooLarge { .. })
    ));
}
