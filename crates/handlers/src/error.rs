// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the event boundary layer.

use rota::CoreError;
use rota_persistence::PersistenceError;
use thiserror::Error;

/// Errors surfaced by the lifecycle handlers.
///
/// Malformed events and referential gaps are not errors: they resolve to
/// outcome variants and are logged where they occur. What remains is
/// store failures, which the ingest adapter maps onto its retry contract.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A store operation failed.
    #[error("store operation failed: {0}")]
    Store(#[from] PersistenceError),
    /// Lifecycle staging was rejected.
    #[error("lifecycle staging rejected: {0}")]
    Core(#[from] CoreError),
}

impl HandlerError {
    /// Returns true when the triggering invocation is safe to redeliver.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Store(PersistenceError::TransientConflict(_)))
    }
}
