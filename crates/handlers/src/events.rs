// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event payload types.
//!
//! The event source notifies about document creations and updates on the
//! bookings collection. Documents originate from a schemaless store, so
//! every field other than the id may be absent; the handlers decide per
//! operation what counts as malformed.

use rota_domain::{Booking, BookingId, BookingStatus, ShiftId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A booking document as delivered by the event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDocument {
    /// The booking identifier (the document path's last segment).
    pub id: String,
    /// The owning user, when present.
    #[serde(default)]
    pub user_id: Option<String>,
    /// The referenced shift, when present.
    #[serde(default)]
    pub shift_id: Option<String>,
    /// Lifecycle status string, when present.
    #[serde(default)]
    pub status: Option<String>,
    /// Shift start, seconds since the Unix epoch.
    #[serde(default)]
    pub start_time: Option<i64>,
    /// Shift end, seconds since the Unix epoch.
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Points credited on completion.
    #[serde(default)]
    pub reward_points: Option<i64>,
}

impl BookingDocument {
    /// Parses the document's status field.
    ///
    /// Absent and unrecognized statuses both read as `None`; the
    /// handlers treat either as a pair that cannot match a transition.
    #[must_use]
    pub fn booking_status(&self) -> Option<BookingStatus> {
        self.status
            .as_deref()
            .and_then(|s| BookingStatus::from_str(s).ok())
    }

    /// Returns the start time as a timestamp, when present.
    #[must_use]
    pub const fn start_timestamp(&self) -> Option<Timestamp> {
        match self.start_time {
            Some(seconds) => Some(Timestamp::from_unix(seconds)),
            None => None,
        }
    }

    /// Converts the document into a storable booking.
    ///
    /// Returns `None` when the document cannot represent a booking (no
    /// owner, or negative reward points); such documents are discarded,
    /// not stored.
    #[must_use]
    pub fn to_booking(&self) -> Option<Booking> {
        let user_id: &str = self.user_id.as_deref()?;
        Booking::new(
            BookingId::new(&self.id),
            UserId::new(user_id),
            self.shift_id.as_deref().map(ShiftId::new),
            self.start_timestamp(),
            self.end_time.map(Timestamp::from_unix),
            self.reward_points,
        )
        .ok()
    }
}

/// A document update notification: the document before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingChange {
    /// The document as it was before the update.
    pub before: BookingDocument,
    /// The document as it is after the update.
    pub after: BookingDocument,
}
