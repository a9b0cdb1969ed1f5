// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Late-cancellation assessment.
//!
//! A cancellation is late when it lands less than 24 hours before the
//! shift starts, including shifts that have already started or passed.
//! Late cancellations cost the owning user 5 reliability points and
//! increment their late-cancellation counter. The assessment only acts on
//! the `upcoming → cancelled` before/after pair; every other pair is
//! ignored, and a missing start time discards the event without penalty.

use rota_domain::{BookingStatus, Timestamp, UserDelta};

/// Cancellations closer to the shift start than this are late.
pub const LATE_CANCELLATION_WINDOW_SECONDS: i64 = 86_400;

/// Reliability points deducted for a late cancellation.
pub const RELIABILITY_PENALTY: i64 = 5;

/// Outcome of assessing a booking status change for a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationAssessment {
    /// The before/after pair is not `upcoming → cancelled`.
    NotACancellation,
    /// The booking carries no usable start time; discard without penalty.
    MissingStartTime,
    /// Cancelled 24 hours or more before the shift starts; no penalty.
    OnTime,
    /// Cancelled late; apply the contained delta to the owning user.
    Late(UserDelta),
}

/// Returns true when cancelling at `now` against `start_time` is late.
///
/// The window comparison is strict: cancelling exactly 24 hours before
/// the start is on time.
#[must_use]
pub const fn is_late_cancellation(start_time: Timestamp, now: Timestamp) -> bool {
    start_time.seconds_from(now) < LATE_CANCELLATION_WINDOW_SECONDS
}

/// Returns the user delta for one late cancellation.
#[must_use]
pub const fn late_cancellation_penalty() -> UserDelta {
    UserDelta {
        reliability: -RELIABILITY_PENALTY,
        points: 0,
        late_cancellations: 1,
        shifts_completed: 0,
    }
}

/// Assesses a booking status change for the late-cancellation penalty.
///
/// # Arguments
///
/// * `before` - The booking status before the change
/// * `after` - The booking status after the change
/// * `start_time` - The booking's shift start time, if present
/// * `now` - Wall-clock time at evaluation
#[must_use]
pub const fn assess_cancellation(
    before: BookingStatus,
    after: BookingStatus,
    start_time: Option<Timestamp>,
    now: Timestamp,
) -> CancellationAssessment {
    if !matches!(
        (before, after),
        (BookingStatus::Upcoming, BookingStatus::Cancelled)
    ) {
        return CancellationAssessment::NotACancellation;
    }

    let Some(start_time) = start_time else {
        return CancellationAssessment::MissingStartTime;
    };

    if is_late_cancellation(start_time, now) {
        CancellationAssessment::Late(late_cancellation_penalty())
    } else {
        CancellationAssessment::OnTime
    }
}
