// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking admission.
//!
//! Reacts to booking-creation events. This is the only path that
//! increments a shift's booked count.

use crate::error::HandlerError;
use crate::events::BookingDocument;
use rota_domain::{BookingId, Shift, ShiftId};
use rota_persistence::{AdmissionRecord, Persistence};
use tracing::{debug, info};

/// Outcome of processing one booking-creation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// Capacity was consumed; contains the shift as written.
    Admitted(Shift),
    /// The event was a redelivery; capacity had already been consumed.
    DuplicateDelivery,
    /// The referenced shift no longer exists; nothing was written.
    ShiftMissing,
    /// The document carries no shift reference; discarded as malformed.
    MissingShiftId,
}

/// Handles a booking-creation event.
///
/// Extracts the shift reference and admits the booking into the shift via
/// one atomic read-modify-write. A document without a shift reference is
/// malformed input: discarded, not retried.
///
/// # Errors
///
/// Returns an error only for store failures; malformed and stale events
/// resolve to outcome variants.
pub fn on_booking_created(
    store: &mut Persistence,
    document: &BookingDocument,
) -> Result<AdmissionOutcome, HandlerError> {
    let Some(shift_id) = document.shift_id.as_deref() else {
        debug!(booking = %document.id, "discarding booking-created event without shift id");
        return Ok(AdmissionOutcome::MissingShiftId);
    };

    let record: AdmissionRecord =
        store.admit_booking(&BookingId::new(&document.id), &ShiftId::new(shift_id))?;

    Ok(match record {
        AdmissionRecord::Admitted(shift) => {
            info!(
                booking = %document.id,
                shift = %shift.id,
                booked_count = shift.booked_count,
                status = %shift.status,
                "admitted booking into shift"
            );
            AdmissionOutcome::Admitted(shift)
        }
        AdmissionRecord::AlreadyAdmitted => {
            debug!(booking = %document.id, "ignoring redelivered booking-created event");
            AdmissionOutcome::DuplicateDelivery
        }
        AdmissionRecord::ShiftMissing => {
            debug!(
                booking = %document.id,
                shift = shift_id,
                "booking references a shift that no longer exists"
            );
            AdmissionOutcome::ShiftMissing
        }
    })
}
