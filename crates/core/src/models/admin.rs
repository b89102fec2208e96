use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::appointment::TransactionStatus;

/// One row of the admin payment ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub transaction_id: Uuid,
    pub appointment_id: Uuid,
    pub payment_id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub amount_cents: i64,
    pub payment_method: String,
    pub status: TransactionStatus,
    pub payment_date: DateTime<Utc>,
}

/// Clinic-wide counters for the admin dashboard.
///
/// `total_slots` and `booked_slots` are summed over active schedules only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_doctors: i64,
    pub active_doctors: i64,
    pub total_schedules: i64,
    pub active_schedules: i64,
    pub total_slots: i64,
    pub booked_slots: i64,
    pub total_appointments: i64,
    pub booked_appointments: i64,
    pub today_appointments: i64,
}
