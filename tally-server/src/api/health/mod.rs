//! Health check route
//!
//! | Path | Method | Purpose |
//! |------|--------|---------|
//! | /health | GET | Liveness, version and a store probe |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    /// ok | error
    store: &'static str,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let store = match state.store.check() {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "store health probe failed");
            "error"
        }
    };

    Json(HealthResponse {
        status: if store == "ok" { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}
