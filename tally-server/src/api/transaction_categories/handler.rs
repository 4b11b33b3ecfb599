//! Transaction category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::ListParams;
use crate::core::ServerState;
use crate::db::{Page, Repository};
use crate::utils::AppResult;
use shared::models::TransactionCategory;

/// GET /api/transaction-categories
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<TransactionCategory>>> {
    let repo = Repository::<TransactionCategory>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/transaction-categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TransactionCategory>> {
    let repo = Repository::<TransactionCategory>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}
