use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/availability",
            post(handlers::availability::compute_availability),
        )
        .route("/api/slots", get(handlers::availability::slot_grid))
}
