use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        // Admin
        .route("/api/admin/schedules", post(handlers::schedule::create_schedule))
        .route(
            "/api/admin/schedules/:id",
            put(handlers::schedule::update_schedule).delete(handlers::schedule::delete_schedule),
        )
        // Public
        .route("/api/schedules", get(handlers::schedule::list_schedules))
        .route("/api/schedules/:id", get(handlers::schedule::get_schedule))
        .route(
            "/api/doctors/:id/schedules/upcoming",
            get(handlers::schedule::upcoming_schedules),
        )
}
