use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/daily", get(handlers::get_daily))
        .route("/api/refresh", post(handlers::refresh))
        .with_state(state)
}
