//! Table discovery handlers.
//!
//! Seating and play happen over the WebSocket; these endpoints only let a
//! client find a table to connect to.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use card_room::table::{TableId, TableMetadata};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// List all open tables.
///
/// Returns `200 OK` with an array of table summaries ordered by id:
/// ```json
/// [
///   {
///     "id": 1,
///     "name": "Table 1",
///     "seat_count": 2,
///     "max_seats": 10,
///     "small_blind": 50,
///     "big_blind": 100,
///     "phase": "PRE_FLOP",
///     "is_started": true
///   }
/// ]
/// ```
pub async fn list_tables(State(state): State<AppState>) -> Json<Vec<TableMetadata>> {
    Json(state.table_manager.list_tables().await)
}

/// Metadata for one table, or `404 Not Found`.
pub async fn get_table(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
) -> Result<Json<TableMetadata>, (StatusCode, Json<ErrorResponse>)> {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Table {table_id} not found"),
            }),
        )
    };

    let handle = state
        .table_manager
        .get_table(table_id)
        .await
        .ok_or_else(not_found)?;
    let snapshot = handle.snapshot().await.map_err(|_| not_found())?;
    Ok(Json(snapshot.into()))
}
