// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Transaction contention; the bounded internal retry was exhausted.
    /// Safe for the triggering invocation to redeliver.
    TransientConflict(String),
    /// The requested record was not found.
    NotFound(String),
    /// A stored row could not be mapped back onto a domain entity.
    ReconstructionError(String),
    /// A staged batch exceeds the atomic batch-write limit.
    BatchTooLarge {
        /// The number of writes staged.
        writes: usize,
    },
    /// A status write was rejected by the booking lifecycle rules.
    TransitionRejected(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::TransientConflict(msg) => {
                write!(f, "Transient transaction conflict: {msg}")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ReconstructionError(msg) => {
                write!(f, "Record reconstruction error: {msg}")
            }
            Self::BatchTooLarge { writes } => {
                write!(f, "Batch of {writes} writes exceeds the atomic batch limit")
            }
            Self::TransitionRejected(msg) => {
                write!(f, "Status transition rejected: {msg}")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(kind, info) => {
                // SQLite reports lock contention as a generic database
                // error; classify it so callers can retry.
                let message: String = info.message().to_string();
                if matches!(
                    kind,
                    diesel::result::DatabaseErrorKind::SerializationFailure
                ) || message.contains("database is locked")
                    || message.contains("database table is locked")
                {
                    Self::TransientConflict(message)
                } else {
                    Self::DatabaseError(message)
                }
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}
