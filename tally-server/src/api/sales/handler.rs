//! Sales API Handlers
//!
//! Aggregate request/response shapes: creates take `{saleData, itemsData}`
//! and return `{sale, items}`; updates replace the line items wholesale
//! (fresh ids, anything not resubmitted is gone).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::{DeleteResponse, ListParams};
use crate::core::ServerState;
use crate::db::{AggregateWriter, Page, Repository};
use crate::utils::AppResult;
use shared::models::{Sale, SaleCreate, SaleItem, SaleItemPayload, SaleUpdate};
use shared::util::new_id;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreateRequest {
    pub sale_data: SaleCreate,
    pub items_data: Vec<SaleItemPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdateRequest {
    pub sale_data: SaleUpdate,
    pub items_data: Vec<SaleItemPayload>,
}

#[derive(Debug, Serialize)]
pub struct SaleWithItems {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

fn writer(state: &ServerState) -> AggregateWriter<Sale, SaleItem> {
    AggregateWriter::new(state.store.clone())
}

/// GET /api/sales
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Sale>>> {
    let repo = Repository::<Sale>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/sales/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Sale>> {
    let repo = Repository::<Sale>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}

/// GET /api/sales/:id/items - line items of one sale
pub async fn list_items(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Page<SaleItem>>> {
    let repo = Repository::<SaleItem>::new(state.store.clone());
    let items = repo.list_for_parent(&id)?;
    Ok(Json(Page { items, next: None }))
}

/// POST /api/sales - aggregate create
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<SaleCreateRequest>,
) -> AppResult<Json<SaleWithItems>> {
    let parent = req.sale_data.into_record(new_id());
    let children = req
        .items_data
        .into_iter()
        .map(|item| item.into_record(new_id()))
        .collect();

    let (sale, items) = writer(&state).create(parent, children, &state.config.default_actor)?;
    Ok(Json(SaleWithItems { sale, items }))
}

/// PUT /api/sales/:id - merge-update the sale, replace its items
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<SaleUpdateRequest>,
) -> AppResult<Json<SaleWithItems>> {
    let children = req
        .items_data
        .into_iter()
        .map(|item| item.into_record(new_id()))
        .collect();

    let (sale, items) = writer(&state).replace(
        &id,
        &state.config.default_actor,
        |sale| req.sale_data.apply(sale),
        children,
    )?;
    Ok(Json(SaleWithItems { sale, items }))
}

/// DELETE /api/sales/:id - delete the sale and its items
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = writer(&state).delete(&id)?;
    Ok(Json(DeleteResponse { id, deleted }))
}
