//! Client API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::{DeleteResponse, ListParams};
use crate::core::ServerState;
use crate::db::{Page, Repository};
use crate::utils::AppResult;
use shared::models::{Client, ClientCreate, ClientUpdate};
use shared::util::new_id;

/// GET /api/clients
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Client>>> {
    let repo = Repository::<Client>::new(state.store.clone());
    let page = repo.list(params.cursor.as_deref(), params.limit())?;
    Ok(Json(page))
}

/// GET /api/clients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Client>> {
    let repo = Repository::<Client>::new(state.store.clone());
    Ok(Json(repo.get(&id)?))
}

/// POST /api/clients - `registrationDate` is fixed server-side here
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Json<Client>> {
    let repo = Repository::<Client>::new(state.store.clone());
    let client = repo.create(payload.into_record(new_id()), &state.config.default_actor)?;
    Ok(Json(client))
}

/// PUT /api/clients/:id - merge-update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    let repo = Repository::<Client>::new(state.store.clone());
    let client = repo.mutate(&id, &state.config.default_actor, |c| payload.apply(c))?;
    Ok(Json(client))
}

/// DELETE /api/clients/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let repo = Repository::<Client>::new(state.store.clone());
    let deleted = repo.delete(&id)?;
    Ok(Json(DeleteResponse { id, deleted }))
}
