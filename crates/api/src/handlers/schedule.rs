use axum::{
    Json,
    extract::{Path, Query, State},
};
use clinicsync_core::models::schedule::{
    CreateScheduleRequest, DeleteScheduleResponse, ScheduleFilter, ScheduleResponse,
    UpdateScheduleRequest,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<i64>,
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let schedule = state.schedules.create_schedule(payload).await?;
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let schedule = state.schedules.update_schedule(id, payload).await?;
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteScheduleResponse>, AppError> {
    let removed = state.schedules.delete_schedule(id).await?;
    Ok(Json(removed))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let schedule = state.schedules.get_schedule(id).await?;
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
    Query(filter): Query<ScheduleFilter>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let schedules = state.schedules.list_schedules(&filter).await?;
    Ok(Json(schedules))
}

#[axum::debug_handler]
pub async fn upcoming_schedules(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<Uuid>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let schedules = state
        .schedules
        .upcoming_schedules(doctor_id, query.days)
        .await?;
    Ok(Json(schedules))
}
