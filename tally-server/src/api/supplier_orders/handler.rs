//! Supplier order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::ListParams;
use crate::core::ServerState;
use crate::db::{AggregateWriter, Page, Repository};
use crate::utils::AppResult;
use shared::models::{
    SupplierOrder, SupplierOrderCreate, SupplierOrderItem, SupplierOrderItemPayload,
};
use shared::util::new_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub order_data: SupplierOrderCreate,
    pub items_data: Vec<SupplierOrderItemPayload>,
}

#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    pub order: SupplierOrder,
    pub items: Vec<SupplierOrderItem>,
}

/// GET /api/supplier-orders
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<SupplierOrder>>> {
    let repo = Repository::<SupplierOrder>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/supplier-orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SupplierOrder>> {
    let repo = Repository::<SupplierOrder>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}

/// GET /api/supplier-orders/:id/items - line items of one order
pub async fn list_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Page<SupplierOrderItem>>> {
    let repo = Repository::<SupplierOrderItem>::new(state.store.clone());
    let items = repo.list_for_parent(&id)?;
    Ok(Json(Page { items, next: None }))
}

/// POST /api/supplier-orders - aggregate create
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<OrderCreateRequest>,
) -> AppResult<Json<OrderWithItems>> {
    let parent = req.order_data.into_record(new_id());
    let children = req
        .items_data
        .into_iter()
        .map(|item| item.into_record(new_id()))
        .collect();

    let writer = AggregateWriter::<SupplierOrder, SupplierOrderItem>::new(state.store.clone());
    let (order, items) = writer.create(parent, children, &state.config.default_actor)?;
    Ok(Json(OrderWithItems { order, items }))
}
