use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, openapi, state::AppState};

/// Builds the `/students` router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route("/api-docs/openapi.json", get(openapi::openapi_document))
        .route(
            "/students",
            post(handlers::create_student).get(handlers::find_by_name_prefix),
        )
        .route("/students/all", get(handlers::list_students))
        .route("/students/age", get(handlers::find_by_age_range))
        .route(
            "/students/{id}",
            get(handlers::get_student)
                .put(handlers::replace_student)
                .patch(handlers::patch_student)
                .delete(handlers::delete_student),
        )
        .with_state(state)
}
