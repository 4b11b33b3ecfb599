//! Supplier API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{DeleteResponse, ListParams};
use crate::core::ServerState;
use crate::db::{Page, Repository};
use crate::utils::AppResult;
use shared::models::{Supplier, SupplierCreate, SupplierUpdate};
use shared::util::new_id;

/// GET /api/suppliers
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Supplier>>> {
    let repo = Repository::<Supplier>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/suppliers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Supplier>> {
    let repo = Repository::<Supplier>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}

/// POST /api/suppliers
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SupplierCreate>,
) -> AppResult<Json<Supplier>> {
    let repo = Repository::<Supplier>::new(state.store.clone());
    let supplier = repo.create(payload.into_record(new_id()), &state.config.default_actor)?;
    Ok(Json(supplier))
}

/// PUT /api/suppliers/:id - merge-update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SupplierUpdate>,
) -> AppResult<Json<Supplier>> {
    let repo = Repository::<Supplier>::new(state.store.clone());
    let supplier = repo.mutate(&id, &state.config.default_actor, |s| payload.apply(s))?;
    Ok(Json(supplier))
}

/// DELETE /api/suppliers/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let repo = Repository::<Supplier>::new(state.store.clone());
    let deleted = repo.delete(&id)?;
    Ok(Json(DeleteResponse { id, deleted }))
}
