// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cancellation handling.
//!
//! Reacts to booking-update events and applies the late-cancellation
//! penalty. Cancellation never releases the shift's capacity: the booked
//! count and derived status are left untouched.

use crate::error::HandlerError;
use crate::events::BookingChange;
use rota::CancellationAssessment;
use rota_domain::{BookingId, Timestamp, UserId};
use rota_persistence::{PenaltyRecord, Persistence};
use tracing::{debug, info, warn};

/// Outcome of processing one booking-update event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationOutcome {
    /// The penalty was applied to the owning user.
    Penalized,
    /// Cancelled 24 hours or more ahead; no penalty.
    OnTime,
    /// The before/after pair is not `upcoming → cancelled`; ignored.
    NotACancellation,
    /// No usable start time on the document; discarded without penalty.
    MissingStartTime,
    /// The owner reference is absent or unresolvable; nothing written.
    OwnerMissing,
    /// The event was a redelivery; the penalty had already been applied.
    DuplicateDelivery,
}

/// Handles a booking-update event.
///
/// Only the `upcoming → cancelled` before/after pair is acted on; every
/// other pair is ignored. The late window is measured from `now` against
/// the document's start time at evaluation.
///
/// # Errors
///
/// Returns an error only for store failures; malformed events and
/// referential gaps resolve to outcome variants.
pub fn on_booking_updated(
    store: &mut Persistence,
    change: &BookingChange,
    now: Timestamp,
) -> Result<CancellationOutcome, HandlerError> {
    let (Some(before), Some(after)) = (
        change.before.booking_status(),
        change.after.booking_status(),
    ) else {
        return Ok(CancellationOutcome::NotACancellation);
    };

    let assessment: CancellationAssessment =
        rota::assess_cancellation(before, after, change.after.start_timestamp(), now);

    match assessment {
        CancellationAssessment::NotACancellation => Ok(CancellationOutcome::NotACancellation),
        CancellationAssessment::MissingStartTime => {
            debug!(
                booking = %change.after.id,
                "discarding cancellation without a start time"
            );
            Ok(CancellationOutcome::MissingStartTime)
        }
        CancellationAssessment::OnTime => {
            debug!(booking = %change.after.id, "cancellation is on time, no penalty");
            Ok(CancellationOutcome::OnTime)
        }
        CancellationAssessment::Late(delta) => {
            let Some(user_id) = change.after.user_id.as_deref() else {
                warn!(
                    booking = %change.after.id,
                    "late cancellation has no owner reference, dropping penalty"
                );
                return Ok(CancellationOutcome::OwnerMissing);
            };

            let record: PenaltyRecord = store.apply_cancellation_penalty(
                &BookingId::new(&change.after.id),
                &UserId::new(user_id),
                &delta,
            )?;

            Ok(match record {
                PenaltyRecord::Penalized => {
                    info!(
                        booking = %change.after.id,
                        user = user_id,
                        "applied late-cancellation penalty"
                    );
                    CancellationOutcome::Penalized
                }
                PenaltyRecord::AlreadyPenalized => {
                    debug!(
                        booking = %change.after.id,
                        "ignoring redelivered cancellation event"
                    );
                    CancellationOutcome::DuplicateDelivery
                }
                PenaltyRecord::OwnerMissing => {
                    warn!(
                        booking = %change.after.id,
                        user = user_id,
                        "late cancellation owner not found, dropping penalty"
                    );
                    CancellationOutcome::OwnerMissing
                }
            })
        }
    }
}
