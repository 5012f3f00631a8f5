//! Axum route handlers for profile and session endpoints.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::{AuthState, Role, UserProfile, MAX_SEMESTER, MIN_SEMESTER};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    // Accepted for form parity; the simulated session never checks it.
    #[serde(default)]
    #[allow(dead_code)]
    pub password: Option<String>,
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthState>, AppError> {
    let user = state
        .session
        .login(request.name, request.email, request.role)
        .await?;
    // signing in adopts the user's name into the profile
    state
        .profile
        .update(|profile| profile.name = user.name.clone())
        .await?;
    Ok(Json(state.session.current().await))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<Json<AuthState>, AppError> {
    state.session.logout().await?;
    Ok(Json(state.session.current().await))
}

/// GET /api/v1/auth
pub async fn handle_get_session(State(state): State<AppState>) -> Json<AuthState> {
    Json(state.session.current().await)
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.profile.get().await)
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&profile.semester) {
        return Err(AppError::Validation(format!(
            "semester must be between {MIN_SEMESTER} and {MAX_SEMESTER}"
        )));
    }
    state.profile.set(profile.clone()).await?;
    Ok(Json(profile))
}
