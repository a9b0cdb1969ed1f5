// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::events::{BookingChange, BookingDocument};
use rota_domain::{Shift, ShiftId, User, UserId};
use rota_persistence::Persistence;

/// Creates a fresh in-memory store.
pub fn create_test_store() -> Persistence {
    Persistence::new_in_memory().expect("in-memory store should initialize")
}

/// Inserts a shift with the given capacity.
pub fn seed_shift(store: &mut Persistence, id: &str, capacity: i64) {
    let shift: Shift = Shift::new(ShiftId::new(id), capacity).unwrap();
    store.insert_shift(&shift).unwrap();
}

/// Inserts a zeroed user.
pub fn seed_user(store: &mut Persistence, id: &str) {
    let user: User = User::new(UserId::new(id));
    store.insert_user(&user).unwrap();
}

/// Builds a booking document as the event source would deliver it.
pub fn booking_document(
    id: &str,
    user_id: Option<&str>,
    shift_id: Option<&str>,
    status: Option<&str>,
    start_time: Option<i64>,
    end_time: Option<i64>,
    reward_points: Option<i64>,
) -> BookingDocument {
    BookingDocument {
        id: id.to_string(),
        user_id: user_id.map(str::to_string),
        shift_id: shift_id.map(str::to_string),
        status: status.map(str::to_string),
        start_time,
        end_time,
        reward_points,
    }
}

/// Inserts the booking a creation document describes, mirroring how the
/// ingest adapter persists documents before dispatching the event.
pub fn store_document(store: &mut Persistence, document: &BookingDocument) {
    let booking = document.to_booking().expect("document should be storable");
    store.insert_booking(&booking).unwrap();
}

/// Builds an update notification flipping the document's status.
pub fn status_change(document: &BookingDocument, before: &str, after: &str) -> BookingChange {
    let mut before_doc: BookingDocument = document.clone();
    before_doc.status = Some(before.to_string());
    let mut after_doc: BookingDocument = document.clone();
    after_doc.status = Some(after.to_string());
    BookingChange {
        before: before_doc,
        after: after_doc,
    }
}
