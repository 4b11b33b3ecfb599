//! Transaction API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{DeleteResponse, ListParams};
use crate::core::ServerState;
use crate::db::{Page, Repository};
use crate::utils::AppResult;
use shared::models::{Transaction, TransactionCreate, TransactionUpdate};
use shared::util::new_id;

/// GET /api/transactions
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Transaction>>> {
    let repo = Repository::<Transaction>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/transactions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let repo = Repository::<Transaction>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}

/// POST /api/transactions
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionCreate>,
) -> AppResult<Json<Transaction>> {
    let repo = Repository::<Transaction>::new(state.store.clone());
    let transaction = repo.create(payload.into_record(new_id()), &state.config.default_actor)?;
    Ok(Json(transaction))
}

/// PUT /api/transactions/:id - merge-update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionUpdate>,
) -> AppResult<Json<Transaction>> {
    let repo = Repository::<Transaction>::new(state.store.clone());
    let transaction = repo.mutate(&id, &state.config.default_actor, |t| payload.apply(t))?;
    Ok(Json(transaction))
}

/// DELETE /api/transactions/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let repo = Repository::<Transaction>::new(state.store.clone());
    let deleted = repo.delete(&id)?;
    Ok(Json(DeleteResponse { id, deleted }))
}
