// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity ledger math.
//!
//! Maintains `booked_count`/`status` consistency for a single shift. The
//! persistence layer runs [`admit`] inside an atomic read-modify-write
//! transaction, so under N concurrent admissions the final count is the
//! initial count plus N exactly; a non-transactional increment would lose
//! updates under concurrent writers and is not provided.

use rota_domain::{Shift, ShiftStatus};

/// Derives a shift's status from its counts.
///
/// A shift is closed exactly when `booked_count >= capacity`. The status
/// field is recomputed from the counts at every write and never set
/// independently, so it cannot drift.
#[must_use]
pub const fn derive_status(booked_count: i64, capacity: i64) -> ShiftStatus {
    if booked_count >= capacity {
        ShiftStatus::Closed
    } else {
        ShiftStatus::Open
    }
}

/// Admits one booking into a shift.
///
/// Returns the shift with `booked_count` incremented and `status`
/// rederived. The increment is unconditional: capacity is enforced by the
/// derived `closed` status gating new bookings upstream, not by rejecting
/// admissions here.
#[must_use]
pub fn admit(shift: &Shift) -> Shift {
    let booked_count: i64 = shift.booked_count + 1;
    Shift {
        id: shift.id.clone(),
        capacity: shift.capacity,
        booked_count,
        status: derive_status(booked_count, shift.capacity),
    }
}
