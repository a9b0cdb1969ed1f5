// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read operations.

use crate::Persistence;
use crate::data_models::{BookingRow, ShiftRow, UserRow};
use crate::diesel_schema::{bookings, shifts, users};
use crate::error::PersistenceError;
use diesel::prelude::*;
use rota_domain::{Booking, BookingId, BookingStatus, Shift, ShiftId, Timestamp, User, UserId};

impl Persistence {
    /// Fetches a shift by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be mapped.
    pub fn get_shift(&mut self, shift_id: &ShiftId) -> Result<Option<Shift>, PersistenceError> {
        let row: Option<ShiftRow> = shifts::table
            .filter(shifts::id.eq(shift_id.value()))
            .first::<ShiftRow>(&mut self.conn)
            .optional()?;
        row.map(ShiftRow::into_domain).transpose()
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: &UserId) -> Result<Option<User>, PersistenceError> {
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(user_id.value()))
            .first::<UserRow>(&mut self.conn)
            .optional()?;
        Ok(row.map(UserRow::into_domain))
    }

    /// Fetches a booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be mapped.
    pub fn get_booking(
        &mut self,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, PersistenceError> {
        let row: Option<BookingRow> = bookings::table
            .filter(bookings::id.eq(booking_id.value()))
            .first::<BookingRow>(&mut self.conn)
            .optional()?;
        row.map(BookingRow::into_domain).transpose()
    }

    /// Fetches one page of upcoming bookings whose end time has passed.
    ///
    /// Results are ordered by booking id and restricted to ids greater
    /// than `after` when a cursor is given, so repeated calls advance
    /// through the due set even when some rows are left untouched (a
    /// booking skipped for a missing owner stays `upcoming` and is picked
    /// up again on the next sweep pass, not re-fetched within this one).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be mapped.
    pub fn due_bookings(
        &mut self,
        due_before: Timestamp,
        after: Option<&BookingId>,
        limit: i64,
    ) -> Result<Vec<Booking>, PersistenceError> {
        let mut query = bookings::table
            .filter(bookings::status.eq(BookingStatus::Upcoming.as_str()))
            .filter(bookings::end_time.le(due_before.unix()))
            .order(bookings::id.asc())
            .limit(limit)
            .into_boxed();

        if let Some(cursor) = after {
            query = query.filter(bookings::id.gt(cursor.value().to_string()));
        }

        let rows: Vec<BookingRow> = query.load::<BookingRow>(&mut self.conn)?;
        rows.into_iter().map(BookingRow::into_domain).collect()
    }
}
