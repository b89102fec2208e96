use axum::{Json, extract::State};
use clinicsync_core::models::admin::{DashboardStats, TransactionSummary};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn list_transactions(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<TransactionSummary>>, AppError> {
    let transactions = state.admin.transactions().await?;
    Ok(Json(transactions))
}

#[axum::debug_handler]
pub async fn dashboard_stats(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = state.admin.dashboard_stats().await?;
    Ok(Json(stats))
}
