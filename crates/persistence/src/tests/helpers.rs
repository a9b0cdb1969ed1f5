// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use rota_domain::{Booking, BookingId, Shift, ShiftId, Timestamp, User, UserId};

/// Creates a fresh in-memory store.
pub fn create_test_store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory store should initialize")
}

/// Inserts a shift with the given capacity and returns it.
pub fn seed_shift(store: &mut Persistence, id: &str, capacity: i64) -> Shift {
    let shift: Shift = Shift::new(ShiftId::new(id), capacity).unwrap();
    store.insert_shift(&shift).unwrap();
    shift
}

/// Inserts a zeroed user and returns it.
pub fn seed_user(store: &mut Persistence, id: &str) -> User {
    let user: User = User::new(UserId::new(id));
    store.insert_user(&user).unwrap();
    user
}

/// Inserts an upcoming booking and returns it.
pub fn seed_booking(
    store: &mut Persistence,
    id: &str,
    user_id: &str,
    shift_id: &str,
    end_time: Option<i64>,
    reward_points: Option<i64>,
) -> Booking {
    let booking: Booking = Booking::new(
        BookingId::new(id),
        UserId::new(user_id),
        Some(ShiftId::new(shift_id)),
        None,
        end_time.map(Timestamp::from_unix),
        reward_points,
    )
    .unwrap();
    store.insert_booking(&booking).unwrap();
    booking
}
