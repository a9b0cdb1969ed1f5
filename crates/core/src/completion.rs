// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Completion staging.
//!
//! The completion sweep finds past-due upcoming bookings and finalizes
//! them. Staging is pure: it validates the `upcoming → completed`
//! transition and produces the pair of writes the persistence layer
//! commits in one all-or-nothing batch.

use crate::error::CoreError;
use rota_domain::{Booking, BookingId, BookingStatus, Timestamp, UserDelta, UserId};

/// The two writes that finalize one booking.
///
/// The booking write sets `status = completed` and `completed_at`; the
/// user write credits `reward_points` and bumps the completed counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionStaging {
    /// The booking to finalize.
    pub booking_id: BookingId,
    /// The user to credit.
    pub user_id: UserId,
    /// Completion time stamped onto the booking.
    pub completed_at: Timestamp,
    /// The reward credit applied to the owning user.
    pub credit: UserDelta,
}

/// Returns the user delta crediting one completed booking.
///
/// `reward_points` defaults to 0 when the booking carries none.
#[must_use]
pub const fn completion_credit(reward_points: Option<i64>) -> UserDelta {
    let points: i64 = match reward_points {
        Some(points) => points,
        None => 0,
    };
    UserDelta {
        reliability: 0,
        points,
        late_cancellations: 0,
        shifts_completed: 1,
    }
}

/// Stages the completion of one booking.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the booking is not `upcoming`;
/// terminal bookings are never re-completed, which is what makes the
/// sweep idempotent under re-runs and concurrent passes.
pub fn stage_completion(booking: &Booking, now: Timestamp) -> Result<CompletionStaging, CoreError> {
    booking
        .status
        .validate_transition(BookingStatus::Completed)?;

    Ok(CompletionStaging {
        booking_id: booking.id.clone(),
        user_id: booking.user_id.clone(),
        completed_at: now,
        credit: completion_credit(booking.reward_points),
    })
}
