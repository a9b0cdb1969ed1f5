// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rota Server - event ingest and sweep scheduler.
//!
//! Adapts the two external triggers onto the lifecycle handlers: an HTTP
//! ingest surface receiving document-change notifications from the event
//! source, and a fixed-interval timer driving the completion sweep. The
//! event source delivers at least once and expects a retryable status on
//! transient failures; everything else is absorbed and logged, because
//! no caller waits on these notifications.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    routing::post,
};
use clap::Parser;
use rota_domain::{BookingId, Timestamp};
use rota_handlers::{
    BookingChange, BookingDocument, HandlerError, on_booking_created, on_booking_updated,
    run_completion_sweep,
};
use rota_persistence::{Persistence, PersistenceError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Rota Server - backend for the Rota Shift Booking System
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Minutes between completion sweep passes
    #[arg(short, long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    sweep_interval_minutes: u64,
}

/// Application state shared across handlers and the sweep scheduler.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, serialized behind a mutex.
    store: Arc<Mutex<Persistence>>,
}

/// Maps a handler failure onto the ingest response contract.
///
/// Transient store conflicts answer 503 so the at-least-once source
/// redelivers; everything else is logged and absorbed with 204.
fn failure_status(err: &HandlerError) -> StatusCode {
    if err.is_transient() {
        warn!(error = %err, "transient store conflict, requesting redelivery");
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        error!(error = %err, "event processing failed, dropping event");
        StatusCode::NO_CONTENT
    }
}

/// Ingests a booking-created notification.
///
/// The ingest adapter also stands in for the external booking-creation
/// flow: the document is persisted first, then the admission handler
/// runs. Documents that cannot represent a booking are still dispatched;
/// admission decides whether they are malformed.
async fn ingest_booking_created(
    AxumState(state): AxumState<AppState>,
    Json(document): Json<BookingDocument>,
) -> StatusCode {
    let mut store = state.store.lock().await;

    if let Some(booking) = document.to_booking() {
        if let Err(err) = store.insert_booking(&booking) {
            return failure_status(&HandlerError::from(err));
        }
    } else {
        debug!(booking = %document.id, "creation document is not storable");
    }

    match on_booking_created(&mut store, &document) {
        Ok(outcome) => {
            debug!(booking = %document.id, ?outcome, "processed booking-created event");
            StatusCode::NO_CONTENT
        }
        Err(err) => failure_status(&err),
    }
}

/// Ingests a booking-updated notification.
///
/// Mirrors the new status onto the stored document (the store enforces
/// the forward-only lifecycle, so replayed or out-of-order updates are
/// rejected there and ignored here), then runs the cancellation handler.
async fn ingest_booking_updated(
    AxumState(state): AxumState<AppState>,
    Json(change): Json<BookingChange>,
) -> StatusCode {
    let mut store = state.store.lock().await;

    if let Some(new_status) = change.after.booking_status() {
        match store.set_booking_status(&BookingId::new(&change.after.id), new_status) {
            Ok(()) => {}
            Err(PersistenceError::NotFound(_) | PersistenceError::TransitionRejected(_)) => {
                debug!(
                    booking = %change.after.id,
                    status = %new_status,
                    "stored document not updated by this notification"
                );
            }
            Err(err) => return failure_status(&HandlerError::from(err)),
        }
    }

    match on_booking_updated(&mut store, &change, Timestamp::now()) {
        Ok(outcome) => {
            debug!(booking = %change.after.id, ?outcome, "processed booking-updated event");
            StatusCode::NO_CONTENT
        }
        Err(err) => failure_status(&err),
    }
}

/// Builds the ingest router.
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/events/bookings/created", post(ingest_booking_created))
        .route("/events/bookings/updated", post(ingest_booking_updated))
        .with_state(state)
}

/// Spawns the completion sweep scheduler.
///
/// The timer does not wait for a previous pass to finish before the next
/// tick; overlapping passes are safe because the sweep's status filter
/// makes finalization idempotent.
fn spawn_sweep_scheduler(state: AppState, interval_minutes: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_minutes * 60));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let mut store = state.store.lock().await;
            match run_completion_sweep(&mut store, Timestamp::now()) {
                Ok(summary) => {
                    info!(
                        completed = summary.completed,
                        skipped_missing_owner = summary.skipped_missing_owner,
                        failed_batches = summary.failed_batches,
                        "completion sweep pass finished"
                    );
                }
                Err(err) => {
                    error!(error = %err, "completion sweep failed, next pass retries");
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Rota Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(persistence)),
    };

    // Start the completion sweep scheduler
    info!(
        "Scheduling completion sweep every {} minutes",
        args.sweep_interval_minutes
    );
    spawn_sweep_scheduler(app_state.clone(), args.sweep_interval_minutes);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
