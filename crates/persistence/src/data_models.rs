// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs mapping database records onto domain entities.

use crate::diesel_schema::{bookings, shifts, users};
use crate::error::PersistenceError;
use diesel::prelude::*;
use rota_domain::{
    Booking, BookingId, BookingStatus, Shift, ShiftId, ShiftStatus, Timestamp, User, UserId,
    UserStats,
};
use std::str::FromStr;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = shifts)]
pub(crate) struct ShiftRow {
    pub id: String,
    pub capacity: i64,
    pub booked_count: i64,
    pub status: String,
}

impl ShiftRow {
    pub(crate) fn from_domain(shift: &Shift) -> Self {
        Self {
            id: shift.id.value().to_string(),
            capacity: shift.capacity,
            booked_count: shift.booked_count,
            status: shift.status.as_str().to_string(),
        }
    }

    pub(crate) fn into_domain(self) -> Result<Shift, PersistenceError> {
        let status: ShiftStatus = ShiftStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Shift {
            id: ShiftId::new(&self.id),
            capacity: self.capacity,
            booked_count: self.booked_count,
            status,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub id: String,
    pub reliability: i64,
    pub points: i64,
    pub late_cancellations: i64,
    pub shifts_completed: i64,
}

impl UserRow {
    pub(crate) fn from_domain(user: &User) -> Self {
        Self {
            id: user.id.value().to_string(),
            reliability: user.reliability,
            points: user.points,
            late_cancellations: user.stats.late_cancellations,
            shifts_completed: user.stats.shifts_completed,
        }
    }

    pub(crate) fn into_domain(self) -> User {
        User {
            id: UserId::new(&self.id),
            reliability: self.reliability,
            points: self.points,
            stats: UserStats {
                late_cancellations: self.late_cancellations,
                shifts_completed: self.shifts_completed,
            },
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingRow {
    pub id: String,
    pub user_id: String,
    pub shift_id: Option<String>,
    pub status: String,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub reward_points: Option<i64>,
    pub completed_at: Option<i64>,
    pub admitted: bool,
    pub penalized: bool,
}

impl BookingRow {
    pub(crate) fn from_domain(booking: &Booking) -> Self {
        Self {
            id: booking.id.value().to_string(),
            user_id: booking.user_id.value().to_string(),
            shift_id: booking.shift_id.as_ref().map(|s| s.value().to_string()),
            status: booking.status.as_str().to_string(),
            start_time: booking.start_time.map(|t| t.unix()),
            end_time: booking.end_time.map(|t| t.unix()),
            reward_points: booking.reward_points,
            completed_at: booking.completed_at.map(|t| t.unix()),
            admitted: booking.admitted,
            penalized: booking.penalized,
        }
    }

    pub(crate) fn into_domain(self) -> Result<Booking, PersistenceError> {
        let status: BookingStatus = BookingStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Booking {
            id: BookingId::new(&self.id),
            user_id: UserId::new(&self.user_id),
            shift_id: self.shift_id.as_deref().map(ShiftId::new),
            status,
            start_time: self.start_time.map(Timestamp::from_unix),
            end_time: self.end_time.map(Timestamp::from_unix),
            reward_points: self.reward_points,
            completed_at: self.completed_at.map(Timestamp::from_unix),
            admitted: self.admitted,
            penalized: self.penalized,
        })
    }
}
