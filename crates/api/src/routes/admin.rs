use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admin/transactions", get(handlers::admin::list_transactions))
        .route("/api/admin/dashboard/stats", get(handlers::admin::dashboard_stats))
}
