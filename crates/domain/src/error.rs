// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Shift capacity must be a positive integer.
    InvalidCapacity {
        /// The invalid capacity value.
        capacity: i64,
    },
    /// Booked count may not be negative.
    InvalidBookedCount {
        /// The invalid count value.
        count: i64,
    },
    /// Reward points may not be negative.
    InvalidRewardPoints {
        /// The invalid points value.
        points: i64,
    },
    /// Booking status string is not a valid status.
    InvalidBookingStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Shift status string is not a valid status.
    InvalidShiftStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// A booking status transition is not permitted.
    InvalidStatusTransition {
        /// The status transitioned from.
        from: String,
        /// The status transitioned to.
        to: String,
        /// Why the transition is not allowed.
        reason: String,
    },
    /// An identifier is empty.
    EmptyIdentifier {
        /// The kind of identifier (e.g. "shift", "booking", "user").
        kind: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCapacity { capacity } => {
                write!(f, "Invalid capacity: {capacity}. Must be greater than 0")
            }
            Self::InvalidBookedCount { count } => {
                write!(f, "Invalid booked count: {count}. Must not be negative")
            }
            Self::InvalidRewardPoints { points } => {
                write!(f, "Invalid reward points: {points}. Must not be negative")
            }
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: '{status}'")
            }
            Self::InvalidShiftStatus { status } => {
                write!(f, "Invalid shift status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from '{from}' to '{to}': {reason}")
            }
            Self::EmptyIdentifier { kind } => {
                write!(f, "Empty {kind} identifier")
            }
        }
    }
}

impl std::error::Error for DomainError {}
