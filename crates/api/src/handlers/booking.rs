use axum::{
    Json,
    extract::{Path, State},
};
use clinicsync_core::models::appointment::{
    BookingRequest, BookingResponse, CancelAppointmentResponse, PatientAppointment,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.bookings.book(payload).await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.bookings.get_booking(appointment_id).await?;
    Ok(Json(booking))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<CancelAppointmentResponse>, AppError> {
    let cancelled = state.bookings.cancel(appointment_id).await?;
    Ok(Json(cancelled))
}

#[axum::debug_handler]
pub async fn patient_appointments(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<PatientAppointment>>, AppError> {
    let appointments = state.bookings.patient_appointments(patient_id).await?;
    Ok(Json(appointments))
}
