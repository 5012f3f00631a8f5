//! Axum route handlers for the internship catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::errors::AppError;
use crate::models::analysis::Internship;
use crate::state::AppState;

/// GET /api/v1/internships
pub async fn handle_list_internships(State(state): State<AppState>) -> Json<Vec<Internship>> {
    Json(state.catalog.list().await)
}

/// POST /api/v1/internships
///
/// Upsert: a matching id replaces the entry in place, anything else is
/// appended under a generated id.
pub async fn handle_save_internship(
    State(state): State<AppState>,
    Json(internship): Json<Internship>,
) -> Result<Json<Internship>, AppError> {
    let stored = state.catalog.save(internship).await?;
    Ok(Json(stored))
}

/// DELETE /api/v1/internships/:id
pub async fn handle_delete_internship(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.catalog.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
