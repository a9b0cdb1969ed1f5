// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Rota Shift Booking System.
//!
//! This crate is the transactional document store the lifecycle handlers
//! coordinate through. It is built on Diesel over `SQLite` and provides
//! the four storage primitives the system relies on:
//!
//! - point reads and writes of shifts, users, and bookings
//! - atomic read-modify-write transactions with bounded internal retry
//!   on lock contention (capacity admission, penalty application)
//! - atomic numeric field increments ([`rota_domain::UserDelta`] applied
//!   in a single `UPDATE`, never a read-then-overwrite)
//! - all-or-nothing batched writes bounded by [`MAX_BATCH_WRITES`]
//!   (the completion sweep's commit unit)
//!
//! There are no foreign keys: booking documents originate from a
//! schemaless source and referential gaps (a booking whose owner or
//! shift is missing) are tolerated by design and handled per item.
//!
//! ## Testing
//!
//! `new_in_memory()` creates a uniquely named shared in-memory database
//! per call, so tests are isolated without external infrastructure and
//! without time-based collisions.

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

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::{AdmissionRecord, BatchOutcome, MAX_BATCH_WRITES, PenaltyRecord};

use diesel::SqliteConnection;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for shifts, users, and bookings.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("rota_memdb_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter backed by a database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_with_file(path: &str) -> Result<Self, PersistenceError> {
        let conn: SqliteConnection = sqlite::initialize_database(path)?;
        Ok(Self { conn })
    }
}
