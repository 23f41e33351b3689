//! REST API over a completed run.
//!
//! Provides three GET endpoints:
//! - `/audit`: comparative financial audit
//! - `/dispatch`: hourly dispatch records with optional range filtering
//! - `/snapshot`: the compact advisory payload

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::error::Result;
use crate::io::snapshot::AdvisorySnapshot;
use crate::runner::SimulationResult;

pub use types::{DispatchQuery, ErrorResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once after the run completes. All data is read-only, so it is
/// shared through an `Arc` without locks.
pub struct AppState {
    /// Records and audit of the requested strategy.
    pub result: SimulationResult,
    /// Advisory snapshot of the same run.
    pub snapshot: AdvisorySnapshot,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/audit", get(handlers::get_audit))
        .route("/dispatch", get(handlers::get_dispatch))
        .route("/snapshot", get(handlers::get_snapshot))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns [`crate::Error::Io`] if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
