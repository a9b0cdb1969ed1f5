// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{Booking, BookingId, Shift, ShiftId, Timestamp, UserId};

/// Creates a shift with the given capacity and booked count.
pub fn create_test_shift(capacity: i64, booked_count: i64) -> Shift {
    let mut shift: Shift = Shift::new(ShiftId::new("shift-1"), capacity).unwrap();
    shift.booked_count = booked_count;
    shift.status = crate::derive_status(booked_count, capacity);
    shift
}

/// Creates an upcoming booking with the given times and reward points.
pub fn create_test_booking(
    start_time: Option<i64>,
    end_time: Option<i64>,
    reward_points: Option<i64>,
) -> Booking {
    Booking::new(
        BookingId::new("booking-1"),
        UserId::new("user-1"),
        Some(ShiftId::new("shift-1")),
        start_time.map(Timestamp::from_unix),
        end_time.map(Timestamp::from_unix),
        reward_points,
    )
    .unwrap()
}
