//! Read-only admin views: the payment ledger and dashboard counters.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::{
    errors::ClinicResult,
    models::admin::{DashboardStats, TransactionSummary},
    store::ClinicStore,
};

#[derive(Clone)]
pub struct AdminService {
    store: Arc<dyn ClinicStore>,
}

impl AdminService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn transactions(&self) -> ClinicResult<Vec<TransactionSummary>> {
        let transactions = self.store.list_transactions().await?;
        debug!("Listed {} transactions", transactions.len());
        Ok(transactions)
    }

    /// Counters as of the current UTC date.
    pub async fn dashboard_stats(&self) -> ClinicResult<DashboardStats> {
        self.store.dashboard_stats(Utc::now().date_naive()).await
    }
}
