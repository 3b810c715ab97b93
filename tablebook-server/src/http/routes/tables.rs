//! Table endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use tablebook_core::{NewTable, Table};

use super::common::{non_empty, Deleted};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;

/// Create table request
#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    pub name: Option<String>,
    pub seats: i32,
    pub location: Option<String>,
}

/// GET /tables - list all tables
async fn list_tables(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Table>>, ApiError> {
    let tables = state.store.list_tables().await?;
    Ok(Json(non_empty(tables, "tables", state.empty_list_not_found)?))
}

/// POST /tables - create a new table
async fn create_table(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTableRequest>,
) -> Result<(StatusCode, Json<Table>), ApiError> {
    let new = NewTable::new(req.name, req.seats, req.location)?;
    let table = state.store.create_table(new).await?;
    tracing::info!(table_id = table.id, seats = table.seats, "table created");

    Ok((StatusCode::CREATED, Json(table)))
}

/// DELETE /tables/{id} - delete a table without reservations
async fn delete_table(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Deleted>, ApiError> {
    state.store.delete_table(id).await?;
    tracing::info!(table_id = id, "table deleted");
    Ok(Json(Deleted::ok()))
}

/// Table routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tables", get(list_tables).post(create_table))
        .route("/tables/{id}", delete(delete_table))
}
