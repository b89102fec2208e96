use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/bookings", post(handlers::booking::book_appointment))
        .route(
            "/api/bookings/:appointment_id",
            get(handlers::booking::get_booking),
        )
        .route(
            "/api/bookings/:appointment_id/cancel",
            post(handlers::booking::cancel_appointment),
        )
        .route(
            "/api/patients/:patient_id/appointments",
            get(handlers::booking::patient_appointments),
        )
}
