use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/doctors",
            post(handlers::doctor::create_doctor).get(handlers::doctor::list_doctors),
        )
        .route(
            "/api/admin/doctors/:id",
            put(handlers::doctor::update_doctor)
                .delete(handlers::doctor::deactivate_doctor),
        )
        .route("/api/doctors/search", get(handlers::doctor::search_doctors))
        .route(
            "/api/doctors/specialization/:specialization",
            get(handlers::doctor::doctors_by_specialization),
        )
        .route("/api/doctors/:id", get(handlers::doctor::get_doctor))
}
