use crate::models::{DbDashboardStats, DbTransactionSummary};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_transactions(pool: &Pool<Postgres>) -> Result<Vec<DbTransactionSummary>> {
    tracing::debug!("Listing payment transactions");

    let rows = sqlx::query_as::<_, DbTransactionSummary>(
        r#"
        SELECT t.id AS transaction_id, t.appointment_id, t.payment_id, a.patient_name,
               COALESCE(d.full_name, 'Unknown') AS doctor_name, t.amount_cents,
               t.payment_method, t.status, t.payment_date
        FROM payment_transactions t
        JOIN appointments a ON a.id = t.appointment_id
        LEFT JOIN doctor_schedules s ON s.id = a.schedule_id
        LEFT JOIN doctors d ON d.id = s.doctor_id
        ORDER BY t.payment_date DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn dashboard_stats(pool: &Pool<Postgres>, today: NaiveDate) -> Result<DbDashboardStats> {
    tracing::debug!("Computing dashboard stats for {}", today);

    let row = sqlx::query_as::<_, DbDashboardStats>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM doctors) AS total_doctors,
            (SELECT COUNT(*) FROM doctors WHERE is_active) AS active_doctors,
            (SELECT COUNT(*) FROM doctor_schedules) AS total_schedules,
            (SELECT COUNT(*) FROM doctor_schedules WHERE is_active) AS active_schedules,
            (SELECT COALESCE(SUM(total_slots), 0)::BIGINT
               FROM doctor_schedules WHERE is_active) AS total_slots,
            (SELECT COALESCE(SUM(booked_slots), 0)::BIGINT
               FROM doctor_schedules WHERE is_active) AS booked_slots,
            (SELECT COUNT(*) FROM appointments) AS total_appointments,
            (SELECT COUNT(*) FROM appointments WHERE status = 'booked') AS booked_appointments,
            (SELECT COUNT(*)
               FROM appointments a
               JOIN doctor_schedules s ON s.id = a.schedule_id
              WHERE a.status = 'booked' AND s.schedule_date = $1) AS today_appointments
        "#,
    )
    .bind(today)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
