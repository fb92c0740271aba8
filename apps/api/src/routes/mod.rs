pub mod health;
pub mod interviews;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/interviews/:id/turns",
            post(interviews::handle_turn),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_get_session),
        )
        .with_state(state)
}
