//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{DeleteResponse, ListParams};
use crate::core::ServerState;
use crate::db::{Page, Repository};
use crate::utils::AppResult;
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::new_id;

/// GET /api/products - list products (cursor paged)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Product>>> {
    let repo = Repository::<Product>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = Repository::<Product>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}

/// POST /api/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    let repo = Repository::<Product>::new(state.store.clone());
    let product = repo.create(payload.into_record(new_id()), &state.config.default_actor)?;
    Ok(Json(product))
}

/// PUT /api/products/:id - merge-update a product
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let repo = Repository::<Product>::new(state.store.clone());
    let product = repo.mutate(&id, &state.config.default_actor, |p| payload.apply(p))?;
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let repo = Repository::<Product>::new(state.store.clone());
    let deleted = repo.delete(&id)?;
    Ok(Json(DeleteResponse { id, deleted }))
}
