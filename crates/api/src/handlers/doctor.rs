use axum::{
    Json,
    extract::{Path, Query, State},
};
use clinicsync_core::models::doctor::{
    CreateDoctorRequest, Doctor, DoctorSearch, ListDoctorsQuery, UpdateDoctorRequest,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = state.doctors.create_doctor(payload).await?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListDoctorsQuery>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctors = state.doctors.list_doctors(query.include_inactive).await?;
    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<ApiState>>,
    Query(search): Query<DoctorSearch>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctors = state.doctors.search_doctors(search).await?;
    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn doctors_by_specialization(
    State(state): State<Arc<ApiState>>,
    Path(specialization): Path<String>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctors = state.doctors.doctors_by_specialization(&specialization).await?;
    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = state.doctors.get_doctor(id).await?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDoctorRequest>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = state.doctors.update_doctor(id, payload).await?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn deactivate_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = state.doctors.deactivate_doctor(id).await?;
    Ok(Json(doctor))
}
