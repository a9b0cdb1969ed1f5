// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Every multi-step write here runs inside a single `SQLite` immediate
//! transaction so concurrent contenders either see the whole effect or
//! none of it. Lock contention is retried internally up to
//! [`MAX_TRANSACTION_ATTEMPTS`]; exhaustion surfaces as
//! [`PersistenceError::TransientConflict`], which the triggering
//! invocation is safe to redeliver.

use crate::Persistence;
use crate::data_models::{BookingRow, ShiftRow, UserRow};
use crate::diesel_schema::{bookings, shifts, users};
use crate::error::PersistenceError;
use diesel::prelude::*;
use rota::CompletionStaging;
use rota_domain::{Booking, BookingId, BookingStatus, Shift, ShiftId, User, UserDelta, UserId};
use std::str::FromStr;
use tracing::warn;

/// Upper bound on writes in one all-or-nothing batch.
///
/// The completion sweep stages two writes per booking and sizes its pages
/// so a full page still fits under this limit.
pub const MAX_BATCH_WRITES: usize = 500;

/// Internal retry limit for transactions that hit lock contention.
const MAX_TRANSACTION_ATTEMPTS: u32 = 5;

/// Outcome of a capacity admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionRecord {
    /// The shift was updated; contains the shift as written.
    Admitted(Shift),
    /// The booking's admission was already consumed (duplicate delivery).
    AlreadyAdmitted,
    /// The referenced shift does not exist; nothing was written.
    ShiftMissing,
}

/// Outcome of a late-cancellation penalty application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyRecord {
    /// The penalty was applied to the owning user.
    Penalized,
    /// The booking was already penalized (duplicate delivery).
    AlreadyPenalized,
    /// The owning user does not exist; nothing was written.
    OwnerMissing,
}

/// Outcome of one committed completion batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchOutcome {
    /// Bookings finalized and credited.
    pub completed: usize,
    /// Bookings skipped because the owning user is missing.
    pub skipped_missing_owner: usize,
    /// Bookings skipped because a concurrent pass already finalized them.
    pub skipped_already_final: usize,
}

impl Persistence {
    /// Inserts a shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError> {
        diesel::insert_into(shifts::table)
            .values(ShiftRow::from_domain(shift))
            .execute(&mut self.conn)?;
        Ok(())
    }

    /// Inserts a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_user(&mut self, user: &User) -> Result<(), PersistenceError> {
        diesel::insert_into(users::table)
            .values(UserRow::from_domain(user))
            .execute(&mut self.conn)?;
        Ok(())
    }

    /// Inserts a booking document.
    ///
    /// The event source delivers creation notifications at least once, so
    /// a replayed insert of the same booking id is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_booking(&mut self, booking: &Booking) -> Result<(), PersistenceError> {
        diesel::insert_into(bookings::table)
            .values(BookingRow::from_domain(booking))
            .on_conflict_do_nothing()
            .execute(&mut self.conn)?;
        Ok(())
    }

    /// Writes a booking's status, enforcing the forward-only lifecycle.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the booking does not exist
    /// and `PersistenceError::TransitionRejected` if the write would move
    /// the booking out of a terminal state.
    pub fn set_booking_status(
        &mut self,
        booking_id: &BookingId,
        new_status: BookingStatus,
    ) -> Result<(), PersistenceError> {
        self.transaction_with_retry("set_booking_status", |conn| {
            let current: Option<String> = bookings::table
                .select(bookings::status)
                .filter(bookings::id.eq(booking_id.value()))
                .first::<String>(conn)
                .optional()?;

            let Some(current) = current else {
                return Err(PersistenceError::NotFound(format!(
                    "booking {booking_id}"
                )));
            };

            let current: BookingStatus = BookingStatus::from_str(&current)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
            current
                .validate_transition(new_status)
                .map_err(|e| PersistenceError::TransitionRejected(e.to_string()))?;

            diesel::update(bookings::table.filter(bookings::id.eq(booking_id.value())))
                .set(bookings::status.eq(new_status.as_str()))
                .execute(conn)?;
            Ok(())
        })
    }

    /// Admits one booking into a shift.
    ///
    /// Executes a single atomic read-modify-write: read the shift's
    /// counts, derive the new count and status, and write them together
    /// with the booking's `admitted` marker. Under N concurrent
    /// admissions the final count is the initial count plus N exactly; a
    /// replayed creation event finds the marker set and changes nothing.
    ///
    /// A missing shift is a silent no-op: the triggering event is still
    /// logically valid but refers to a resource that vanished.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TransientConflict` when contention
    /// outlasts the internal retry limit; the caller may redeliver.
    pub fn admit_booking(
        &mut self,
        booking_id: &BookingId,
        shift_id: &ShiftId,
    ) -> Result<AdmissionRecord, PersistenceError> {
        self.transaction_with_retry("admit_booking", |conn| {
            let marker: Option<bool> = bookings::table
                .select(bookings::admitted)
                .filter(bookings::id.eq(booking_id.value()))
                .first::<bool>(conn)
                .optional()?;

            if marker == Some(true) {
                return Ok(AdmissionRecord::AlreadyAdmitted);
            }

            let row: Option<ShiftRow> = shifts::table
                .filter(shifts::id.eq(shift_id.value()))
                .first::<ShiftRow>(conn)
                .optional()?;

            let Some(row) = row else {
                return Ok(AdmissionRecord::ShiftMissing);
            };

            let shift: Shift = row.into_domain()?;
            let admitted: Shift = rota::admit(&shift);

            diesel::update(shifts::table.filter(shifts::id.eq(shift_id.value())))
                .set((
                    shifts::booked_count.eq(admitted.booked_count),
                    shifts::status.eq(admitted.status.as_str()),
                ))
                .execute(conn)?;

            // The marker only exists when the booking document is stored;
            // an event for an untracked booking still admits, it just
            // cannot be deduplicated on redelivery.
            if marker.is_some() {
                diesel::update(bookings::table.filter(bookings::id.eq(booking_id.value())))
                    .set(bookings::admitted.eq(true))
                    .execute(conn)?;
            }

            Ok(AdmissionRecord::Admitted(admitted))
        })
    }

    /// Applies an additive delta to a user's numeric fields.
    ///
    /// The delta is applied as a single `UPDATE` with in-place
    /// increments, so concurrent penalty and reward writes to the same
    /// user never clobber each other.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the user does not exist.
    pub fn apply_user_delta(
        &mut self,
        user_id: &UserId,
        delta: &UserDelta,
    ) -> Result<(), PersistenceError> {
        let updated: usize =
            diesel::update(users::table.filter(users::id.eq(user_id.value())))
                .set((
                    users::reliability.eq(users::reliability + delta.reliability),
                    users::points.eq(users::points + delta.points),
                    users::late_cancellations
                        .eq(users::late_cancellations + delta.late_cancellations),
                    users::shifts_completed
                        .eq(users::shifts_completed + delta.shifts_completed),
                ))
                .execute(&mut self.conn)?;

        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("user {user_id}")));
        }
        Ok(())
    }

    /// Applies the late-cancellation penalty for one booking.
    ///
    /// The booking's `penalized` marker is checked and set inside the
    /// same transaction as the user increments, so a redelivered
    /// cancellation event can never double-penalize. A missing owner is
    /// a no-op for the whole transaction: nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TransientConflict` when contention
    /// outlasts the internal retry limit.
    pub fn apply_cancellation_penalty(
        &mut self,
        booking_id: &BookingId,
        user_id: &UserId,
        delta: &UserDelta,
    ) -> Result<PenaltyRecord, PersistenceError> {
        self.transaction_with_retry("apply_cancellation_penalty", |conn| {
            let marker: Option<bool> = bookings::table
                .select(bookings::penalized)
                .filter(bookings::id.eq(booking_id.value()))
                .first::<bool>(conn)
                .optional()?;

            if marker == Some(true) {
                return Ok(PenaltyRecord::AlreadyPenalized);
            }

            let owner_known: i64 = users::table
                .filter(users::id.eq(user_id.value()))
                .count()
                .get_result::<i64>(conn)?;

            if owner_known == 0 {
                return Ok(PenaltyRecord::OwnerMissing);
            }

            diesel::update(users::table.filter(users::id.eq(user_id.value())))
                .set((
                    users::reliability.eq(users::reliability + delta.reliability),
                    users::late_cancellations
                        .eq(users::late_cancellations + delta.late_cancellations),
                ))
                .execute(conn)?;

            if marker.is_some() {
                diesel::update(bookings::table.filter(bookings::id.eq(booking_id.value())))
                    .set(bookings::penalized.eq(true))
                    .execute(conn)?;
            }

            Ok(PenaltyRecord::Penalized)
        })
    }

    /// Commits one all-or-nothing completion batch.
    ///
    /// For each staged booking: finalize it (guarded by
    /// `status == upcoming`, so a booking completed by a concurrent pass
    /// is left untouched) and credit its owner. Bookings whose owner
    /// cannot be resolved are skipped entirely; no writes for them reach
    /// the database, so they stay `upcoming` and eligible for the next
    /// pass. If the transaction fails, every staged write rolls back
    /// together.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BatchTooLarge` if the staged writes
    /// exceed [`MAX_BATCH_WRITES`], and `TransientConflict` when
    /// contention outlasts the internal retry limit.
    pub fn commit_completions(
        &mut self,
        stagings: &[CompletionStaging],
    ) -> Result<BatchOutcome, PersistenceError> {
        let writes: usize = stagings.len() * 2;
        if writes > MAX_BATCH_WRITES {
            return Err(PersistenceError::BatchTooLarge { writes });
        }

        self.transaction_with_retry("commit_completions", |conn| {
            let mut outcome: BatchOutcome = BatchOutcome::default();

            for staging in stagings {
                let owner_known: i64 = users::table
                    .filter(users::id.eq(staging.user_id.value()))
                    .count()
                    .get_result::<i64>(conn)?;

                if owner_known == 0 {
                    outcome.skipped_missing_owner += 1;
                    continue;
                }

                let finalized: usize = diesel::update(
                    bookings::table.filter(
                        bookings::id
                            .eq(staging.booking_id.value())
                            .and(bookings::status.eq(BookingStatus::Upcoming.as_str())),
                    ),
                )
                .set((
                    bookings::status.eq(BookingStatus::Completed.as_str()),
                    bookings::completed_at.eq(Some(staging.completed_at.unix())),
                ))
                .execute(conn)?;

                if finalized == 0 {
                    outcome.skipped_already_final += 1;
                    continue;
                }

                diesel::update(users::table.filter(users::id.eq(staging.user_id.value())))
                    .set((
                        users::points.eq(users::points + staging.credit.points),
                        users::shifts_completed
                            .eq(users::shifts_completed + staging.credit.shifts_completed),
                    ))
                    .execute(conn)?;

                outcome.completed += 1;
            }

            Ok(outcome)
        })
    }

    /// Runs `op` in an immediate transaction, retrying on lock contention.
    fn transaction_with_retry<T, F>(
        &mut self,
        operation: &'static str,
        mut op: F,
    ) -> Result<T, PersistenceError>
    where
        F: FnMut(&mut diesel::SqliteConnection) -> Result<T, PersistenceError>,
    {
        let mut attempt: u32 = 1;
        loop {
            match self.conn.immediate_transaction(&mut op) {
                Err(PersistenceError::TransientConflict(message))
                    if attempt < MAX_TRANSACTION_ATTEMPTS =>
                {
                    warn!(
                        operation,
                        attempt,
                        message = %message,
                        "transaction conflict, retrying"
                    );
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
