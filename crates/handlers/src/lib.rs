// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event boundary layer for the Rota Shift Booking System.
//!
//! The three lifecycle operations live here, each reacting to one
//! external trigger and coordinating exclusively through the shared
//! store:
//!
//! - [`on_booking_created`] drives the capacity ledger when a booking
//!   document appears.
//! - [`on_booking_updated`] assesses the `upcoming → cancelled`
//!   transition and applies the late-cancellation penalty.
//! - [`run_completion_sweep`] finalizes past-due bookings and credits
//!   reward points, at most once per booking.
//!
//! Triggers arrive at least once and unordered, so every operation is
//! either idempotent or a silent no-op on replay. None of them has a
//! caller waiting on a result: failures are logged and absorbed, except
//! transient store conflicts, which surface so the event source can
//! redeliver.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod admission;
mod cancellation;
mod error;
mod events;
mod sweep;

#[cfg(test)]
mod tests;

pub use admission::{AdmissionOutcome, on_booking_created};
pub use cancellation::{CancellationOutcome, on_booking_updated};
pub use error::HandlerError;
pub use events::{BookingChange, BookingDocument};
pub use sweep::{SweepConfig, SweepSummary, run_completion_sweep, run_completion_sweep_with};
