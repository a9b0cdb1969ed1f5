// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The completion sweep.
//!
//! Runs on a timer. Finds every upcoming booking whose end time has
//! passed, finalizes it, and credits its owner. The `status == upcoming`
//! query filter excludes bookings a previous pass already finalized, so
//! crediting happens at most once per booking no matter how often the
//! sweep runs or overlaps itself.

use crate::error::HandlerError;
use rota::CompletionStaging;
use rota_domain::{Booking, BookingId, Timestamp};
use rota_persistence::{BatchOutcome, MAX_BATCH_WRITES, Persistence};
use tracing::{info, warn};

/// Sweep tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    /// Bookings fetched and committed per batch. Each booking stages two
    /// writes, so the default half-fills the store's batch-write limit.
    pub page_size: i64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        // Staged as two writes per booking against the 500-write cap.
        let page_size: i64 = i64::try_from(MAX_BATCH_WRITES / 2).unwrap_or(250);
        Self { page_size }
    }
}

/// Counters for one sweep pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepSummary {
    /// Bookings finalized and credited.
    pub completed: usize,
    /// Bookings skipped because the owning user is missing; they stay
    /// upcoming and are retried on the next pass.
    pub skipped_missing_owner: usize,
    /// Bookings skipped because a concurrent pass already finalized them.
    pub skipped_already_final: usize,
    /// Batches that failed to commit; their bookings roll back whole and
    /// are retried on the next pass.
    pub failed_batches: usize,
}

/// Runs one completion sweep pass with default tuning.
///
/// # Errors
///
/// Returns an error if the due-booking query fails; batch commit
/// failures are absorbed into the summary, since those bookings remain
/// due and the next pass retries them.
pub fn run_completion_sweep(
    store: &mut Persistence,
    now: Timestamp,
) -> Result<SweepSummary, HandlerError> {
    run_completion_sweep_with(store, now, SweepConfig::default())
}

/// Runs one completion sweep pass.
///
/// Pages through the due set with a keyset cursor so a pass terminates
/// even when rows are skipped, staging each page and committing it as a
/// single all-or-nothing batch.
///
/// # Errors
///
/// Returns an error if the due-booking query fails.
pub fn run_completion_sweep_with(
    store: &mut Persistence,
    now: Timestamp,
    config: SweepConfig,
) -> Result<SweepSummary, HandlerError> {
    let mut summary: SweepSummary = SweepSummary::default();
    let mut cursor: Option<BookingId> = None;

    loop {
        let page: Vec<Booking> = store.due_bookings(now, cursor.as_ref(), config.page_size)?;
        let Some(last) = page.last() else {
            break;
        };
        cursor = Some(last.id.clone());

        let mut stagings: Vec<CompletionStaging> = Vec::with_capacity(page.len());
        for booking in &page {
            match rota::stage_completion(booking, now) {
                Ok(staging) => stagings.push(staging),
                // The query only returns upcoming bookings; a stale row
                // that slipped through is left for the status guard.
                Err(err) => warn!(booking = %booking.id, error = %err, "skipping unstageable booking"),
            }
        }

        match store.commit_completions(&stagings) {
            Ok(outcome) => {
                let BatchOutcome {
                    completed,
                    skipped_missing_owner,
                    skipped_already_final,
                } = outcome;
                summary.completed += completed;
                summary.skipped_missing_owner += skipped_missing_owner;
                summary.skipped_already_final += skipped_already_final;
            }
            Err(err) => {
                warn!(
                    error = %err,
                    bookings = stagings.len(),
                    "completion batch failed, rolled back whole"
                );
                summary.failed_batches += 1;
            }
        }
    }

    info!(
        completed = summary.completed,
        skipped_missing_owner = summary.skipped_missing_owner,
        skipped_already_final = summary.skipped_already_final,
        failed_batches = summary.failed_batches,
        "completion sweep pass finished"
    );

    Ok(summary)
}
