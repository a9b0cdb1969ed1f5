// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use crate::shift_status::ShiftStatus;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identifier of a shift document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    /// Creates a new shift identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a booking document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a new booking identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a user document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new user identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in time, stored as whole seconds since the Unix epoch.
///
/// Event payloads and the document store both carry timestamps at second
/// precision; sub-second precision is never significant to the booking
/// lifecycle rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from whole seconds since the Unix epoch.
    #[must_use]
    pub const fn from_unix(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Returns the timestamp as whole seconds since the Unix epoch.
    #[must_use]
    pub const fn unix(&self) -> i64 {
        self.0
    }

    /// Returns the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Returns the signed number of seconds from `now` until this timestamp.
    ///
    /// Negative when this timestamp is in the past.
    #[must_use]
    pub const fn seconds_from(&self, now: Self) -> i64 {
        self.0 - now.0
    }
}

/// A bookable resource instance with fixed capacity and a time window.
///
/// `booked_count` and `status` are owned by the capacity ledger; `status`
/// is always derived from the counts, never authoritative on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// The shift identifier.
    pub id: ShiftId,
    /// Maximum number of non-cancelled bookings, fixed at creation.
    pub capacity: i64,
    /// Current number of admitted bookings.
    pub booked_count: i64,
    /// Derived open/closed status.
    pub status: ShiftStatus,
}

impl Shift {
    /// Creates a new shift with no bookings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if `capacity` is not positive.
    pub fn new(id: ShiftId, capacity: i64) -> Result<Self, DomainError> {
        if capacity < 1 {
            return Err(DomainError::InvalidCapacity { capacity });
        }
        Ok(Self {
            id,
            capacity,
            booked_count: 0,
            status: ShiftStatus::Open,
        })
    }
}

/// One user's claim on a shift.
///
/// Timestamps and the shift reference are optional because booking
/// documents originate from a schemaless source; the handlers treat
/// missing fields as malformed input, not as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The booking identifier.
    pub id: BookingId,
    /// The owning user.
    pub user_id: UserId,
    /// The shift this booking claims.
    pub shift_id: Option<ShiftId>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// When the shift starts.
    pub start_time: Option<Timestamp>,
    /// When the shift ends; the completion sweep's due time.
    pub end_time: Option<Timestamp>,
    /// Points credited to the owner on completion, fixed at creation.
    pub reward_points: Option<i64>,
    /// Set by the completion sweep when the booking is finalized.
    pub completed_at: Option<Timestamp>,
    /// Marker: capacity admission has been consumed for this booking.
    pub admitted: bool,
    /// Marker: the late-cancellation penalty has been applied.
    pub penalized: bool,
}

impl Booking {
    /// Creates a new upcoming booking.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRewardPoints` if `reward_points` is negative.
    pub fn new(
        id: BookingId,
        user_id: UserId,
        shift_id: Option<ShiftId>,
        start_time: Option<Timestamp>,
        end_time: Option<Timestamp>,
        reward_points: Option<i64>,
    ) -> Result<Self, DomainError> {
        if let Some(points) = reward_points
            && points < 0
        {
            return Err(DomainError::InvalidRewardPoints { points });
        }
        Ok(Self {
            id,
            user_id,
            shift_id,
            status: BookingStatus::Upcoming,
            start_time,
            end_time,
            reward_points,
            completed_at: None,
            admitted: false,
            penalized: false,
        })
    }
}

/// Per-user lifecycle counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserStats {
    /// Number of late cancellations recorded against the user.
    pub late_cancellations: i64,
    /// Number of shifts the user has completed.
    pub shifts_completed: i64,
}

/// The booker who owns bookings, reliability, and reward points.
///
/// Users are owned externally; this system only ever applies additive
/// deltas to their numeric fields, never whole-record overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user identifier.
    pub id: UserId,
    /// Reliability score, decremented by late-cancellation penalties.
    pub reliability: i64,
    /// Reward points, incremented by completion credits.
    pub points: i64,
    /// Lifecycle counters.
    pub stats: UserStats,
}

impl User {
    /// Creates a new user with zeroed score, points, and stats.
    #[must_use]
    pub const fn new(id: UserId) -> Self {
        Self {
            id,
            reliability: 0,
            points: 0,
            stats: UserStats {
                late_cancellations: 0,
                shifts_completed: 0,
            },
        }
    }
}

/// An additive change to a user's numeric fields.
///
/// Deltas are applied as atomic field increments so concurrent penalty
/// and reward writes to the same user never clobber each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserDelta {
    /// Change to the reliability score.
    pub reliability: i64,
    /// Change to the reward points balance.
    pub points: i64,
    /// Change to the late-cancellation counter.
    pub late_cancellations: i64,
    /// Change to the shifts-completed counter.
    pub shifts_completed: i64,
}
