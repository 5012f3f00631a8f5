pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::catalog::handlers as catalog;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session simulation
        .route("/api/v1/auth", get(profile::handle_get_session))
        .route("/api/v1/auth/login", post(profile::handle_login))
        .route("/api/v1/auth/logout", post(profile::handle_logout))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        // Analysis pipeline
        .route(
            "/api/v1/analysis",
            post(analysis::handle_analyze)
                .get(analysis::handle_get_analysis)
                .delete(analysis::handle_clear_analysis),
        )
        .route("/api/v1/analysis/upload", post(analysis::handle_analyze_upload))
        // Internship catalog
        .route(
            "/api/v1/internships",
            get(catalog::handle_list_internships).post(catalog::handle_save_internship),
        )
        .route(
            "/api/v1/internships/:id",
            delete(catalog::handle_delete_internship),
        )
        .with_state(state)
}
