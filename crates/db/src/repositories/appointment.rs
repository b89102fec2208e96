use crate::models::{DbAppointment, DbPaymentTransaction};
use chrono::{DateTime, Utc};
use clinicsync_core::{
    booking::first_free_slot,
    models::appointment::{AppointmentStatus, NewBooking, TransactionStatus},
};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, patient_id, schedule_id, patient_name, patient_contact, \
    slot_number, status, created_at, updated_at";

const TRANSACTION_COLUMNS: &str = "id, appointment_id, patient_id, payment_id, nic, contact_no, \
    email, amount_cents, status, payment_method, bank_name, bank_branch, payment_date";

/// Result of a cancellation attempt.
#[derive(Debug)]
pub enum CancelOutcome {
    Cancelled(DbAppointment),
    AlreadyCancelled,
    Missing,
}

/// Reserves a slot and writes the appointment and its payment in one
/// transaction.
///
/// The first statement increments `booked_slots` only while the schedule is
/// active and has room; the row lock it takes serialises concurrent bookers.
/// The appointment gets the lowest slot number no booked appointment holds.
/// `None` means the increment matched no row and nothing was written.
pub async fn book_appointment(
    pool: &Pool<Postgres>,
    booking: &NewBooking,
) -> Result<Option<(DbAppointment, DbPaymentTransaction)>> {
    let mut tx = pool.begin().await?;

    let reserved = sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE doctor_schedules
        SET booked_slots = booked_slots + 1, updated_at = $2
        WHERE id = $1 AND is_active AND booked_slots < total_slots
        RETURNING booked_slots
        "#,
    )
    .bind(booking.schedule_id)
    .bind(booking.created_at)
    .fetch_optional(&mut *tx)
    .await?;

    if reserved.is_none() {
        tracing::debug!("Booking refused for schedule {}", booking.schedule_id);
        return Ok(None);
    }

    // The schedule row stays locked until commit, so no other booker can
    // pick from the same set of held numbers.
    let held = sqlx::query_scalar::<_, i32>(
        "SELECT slot_number FROM appointments WHERE schedule_id = $1 AND status = $2",
    )
    .bind(booking.schedule_id)
    .bind(AppointmentStatus::Booked.as_str())
    .fetch_all(&mut *tx)
    .await?;
    let slot_number = first_free_slot(held);

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (id, patient_id, schedule_id, patient_name, patient_contact,
            slot_number, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(booking.appointment_id)
    .bind(booking.patient_id)
    .bind(booking.schedule_id)
    .bind(&booking.patient_name)
    .bind(&booking.patient_contact)
    .bind(slot_number)
    .bind(AppointmentStatus::Booked.as_str())
    .bind(booking.created_at)
    .fetch_one(&mut *tx)
    .await?;

    let transaction = booking.transaction();
    let transaction = sqlx::query_as::<_, DbPaymentTransaction>(&format!(
        r#"
        INSERT INTO payment_transactions (id, appointment_id, patient_id, payment_id, nic,
            contact_no, email, amount_cents, status, payment_method, bank_name, bank_branch,
            payment_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {}
        "#,
        TRANSACTION_COLUMNS
    ))
    .bind(transaction.id)
    .bind(transaction.appointment_id)
    .bind(transaction.patient_id)
    .bind(&transaction.payment_id)
    .bind(&transaction.nic)
    .bind(&transaction.contact_no)
    .bind(&transaction.email)
    .bind(transaction.amount_cents)
    .bind(TransactionStatus::Completed.as_str())
    .bind(&transaction.payment_method)
    .bind(&transaction.bank_name)
    .bind(&transaction.bank_branch)
    .bind(transaction.payment_date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!(
        "Booked appointment {} on schedule {} as slot {}",
        appointment.id,
        appointment.schedule_id,
        slot_number
    );
    Ok(Some((appointment, transaction)))
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    tracing::debug!("Getting appointment by id: {}", id);

    let row = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {} FROM appointments WHERE id = $1",
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_transaction_for_appointment(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
) -> Result<Option<DbPaymentTransaction>> {
    let row = sqlx::query_as::<_, DbPaymentTransaction>(&format!(
        "SELECT {} FROM payment_transactions WHERE appointment_id = $1",
        TRANSACTION_COLUMNS
    ))
    .bind(appointment_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_appointments_for_patient(
    pool: &Pool<Postgres>,
    patient_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {}
        FROM appointments
        WHERE patient_id = $1
        ORDER BY created_at DESC
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(patient_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Found {} appointments for patient {}", rows.len(), patient_id);
    Ok(rows)
}

pub async fn get_transactions_for_appointments(
    pool: &Pool<Postgres>,
    appointment_ids: &[Uuid],
) -> Result<Vec<DbPaymentTransaction>> {
    let rows = sqlx::query_as::<_, DbPaymentTransaction>(&format!(
        "SELECT {} FROM payment_transactions WHERE appointment_id = ANY($1)",
        TRANSACTION_COLUMNS
    ))
    .bind(appointment_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Cancels an appointment and gives its slot back in one transaction.
pub async fn cancel_appointment(
    pool: &Pool<Postgres>,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<CancelOutcome> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query_as::<_, DbAppointment>(&format!(
        "SELECT {} FROM appointments WHERE id = $1 FOR UPDATE",
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(current) = current else {
        return Ok(CancelOutcome::Missing);
    };

    if current.status == AppointmentStatus::Cancelled.as_str() {
        return Ok(CancelOutcome::AlreadyCancelled);
    }

    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2, updated_at = $3
        WHERE id = $1
        RETURNING {}
        "#,
        APPOINTMENT_COLUMNS
    ))
    .bind(id)
    .bind(AppointmentStatus::Cancelled.as_str())
    .bind(at)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        UPDATE doctor_schedules
        SET booked_slots = GREATEST(booked_slots - 1, 0), updated_at = $2
        WHERE id = $1
        "#,
    )
    .bind(appointment.schedule_id)
    .bind(at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::debug!("Cancelled appointment {}", id);
    Ok(CancelOutcome::Cancelled(appointment))
}
