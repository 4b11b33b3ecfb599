//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::ListParams;
use crate::core::ServerState;
use crate::db::{Page, Repository};
use crate::utils::AppResult;
use shared::models::Category;

/// GET /api/categories
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Category>>> {
    let repo = Repository::<Category>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let repo = Repository::<Category>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}
