// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle core for the Rota Shift Booking System.
//!
//! This crate holds the pure transition logic shared by the event
//! handlers and the completion sweep: capacity ledger math, the
//! late-cancellation assessment, and completion staging. Nothing here
//! performs I/O; the persistence layer runs these functions inside its
//! transactions so every decision is made against the freshly read state.

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

mod admission;
mod cancellation;
mod completion;
mod error;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use admission::{admit, derive_status};
pub use cancellation::{
    CancellationAssessment, LATE_CANCELLATION_WINDOW_SECONDS, RELIABILITY_PENALTY,
    assess_cancellation, is_late_cancellation, late_cancellation_penalty,
};
pub use completion::{CompletionStaging, completion_credit, stage_completion};
pub use error::CoreError;
