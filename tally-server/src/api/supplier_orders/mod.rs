//! Supplier order API module
//!
//! Supplier orders are aggregates (order + line items); creation goes
//! through the aggregate writer.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/supplier-orders",
        Router::new()
            .route("/", get(handler::list).post(handler::create))
            .route("/{id}", get(handler::get_by_id))
            .route("/{id}/items", get(handler::list_items)),
    )
}
