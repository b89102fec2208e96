use crate::models::DbSchedule;
use chrono::NaiveDate;
use clinicsync_core::models::schedule::{Schedule, ScheduleRemoval};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const SCHEDULE_COLUMNS: &str = "id, doctor_id, schedule_date, start_time, end_time, \
    slot_duration_minutes, max_patients_per_slot, total_slots, booked_slots, is_active, \
    notes, created_at, updated_at";

pub async fn insert_schedule(pool: &Pool<Postgres>, schedule: &Schedule) -> Result<DbSchedule> {
    tracing::debug!(
        "Creating schedule: id={}, doctor_id={}, date={}, {}-{}",
        schedule.id,
        schedule.doctor_id,
        schedule.schedule_date,
        schedule.start_time,
        schedule.end_time
    );

    let row = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        INSERT INTO doctor_schedules (id, doctor_id, schedule_date, start_time, end_time,
            slot_duration_minutes, max_patients_per_slot, total_slots, booked_slots,
            is_active, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING {}
        "#,
        SCHEDULE_COLUMNS
    ))
    .bind(schedule.id)
    .bind(schedule.doctor_id)
    .bind(schedule.schedule_date)
    .bind(schedule.start_time)
    .bind(schedule.end_time)
    .bind(schedule.slot_duration_minutes)
    .bind(schedule.max_patients_per_slot)
    .bind(schedule.total_slots)
    .bind(schedule.booked_slots)
    .bind(schedule.is_active)
    .bind(&schedule.notes)
    .bind(schedule.created_at)
    .bind(schedule.updated_at)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Schedule created successfully: id={}", row.id);
    Ok(row)
}

pub async fn get_schedule_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule by id: {}", id);

    let row = sqlx::query_as::<_, DbSchedule>(&format!(
        "SELECT {} FROM doctor_schedules WHERE id = $1",
        SCHEDULE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_active_schedules_for_doctor(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbSchedule>> {
    tracing::debug!("Getting active schedules for doctor {} on {}", doctor_id, date);

    let rows = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        SELECT {}
        FROM doctor_schedules
        WHERE doctor_id = $1 AND schedule_date = $2 AND is_active
        ORDER BY start_time ASC
        "#,
        SCHEDULE_COLUMNS
    ))
    .bind(doctor_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_schedules(
    pool: &Pool<Postgres>,
    doctor_id: Option<Uuid>,
    date: Option<NaiveDate>,
    active_only: bool,
) -> Result<Vec<DbSchedule>> {
    let rows = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        SELECT {}
        FROM doctor_schedules
        WHERE ($1::uuid IS NULL OR doctor_id = $1)
          AND ($2::date IS NULL OR schedule_date = $2)
          AND (NOT $3 OR is_active)
        ORDER BY schedule_date ASC, start_time ASC
        "#,
        SCHEDULE_COLUMNS
    ))
    .bind(doctor_id)
    .bind(date)
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Listed {} schedules", rows.len());
    Ok(rows)
}

pub async fn get_schedules_between(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbSchedule>> {
    let rows = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        SELECT {}
        FROM doctor_schedules
        WHERE doctor_id = $1 AND is_active AND schedule_date BETWEEN $2 AND $3
        ORDER BY schedule_date ASC, start_time ASC
        "#,
        SCHEDULE_COLUMNS
    ))
    .bind(doctor_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Writes the editable columns of a schedule, but only while the stored
/// `booked_slots` still fits in the new `total_slots`.
///
/// `None` means no row was written: either the schedule does not exist or it
/// holds more bookings than the new total allows.
pub async fn update_schedule_guarded(
    pool: &Pool<Postgres>,
    schedule: &Schedule,
) -> Result<Option<DbSchedule>> {
    tracing::debug!(
        "Updating schedule {}: total_slots={}, is_active={}",
        schedule.id,
        schedule.total_slots,
        schedule.is_active
    );

    let row = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        UPDATE doctor_schedules
        SET schedule_date = $2, start_time = $3, end_time = $4,
            slot_duration_minutes = $5, max_patients_per_slot = $6, total_slots = $7,
            is_active = $8, notes = $9, updated_at = $10
        WHERE id = $1 AND booked_slots <= $7
        RETURNING {}
        "#,
        SCHEDULE_COLUMNS
    ))
    .bind(schedule.id)
    .bind(schedule.schedule_date)
    .bind(schedule.start_time)
    .bind(schedule.end_time)
    .bind(schedule.slot_duration_minutes)
    .bind(schedule.max_patients_per_slot)
    .bind(schedule.total_slots)
    .bind(schedule.is_active)
    .bind(&schedule.notes)
    .bind(schedule.updated_at)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Deletes a schedule nobody booked, otherwise deactivates it. Returns
/// `None` for an unknown id.
pub async fn remove_schedule(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<ScheduleRemoval>> {
    let mut tx = pool.begin().await?;

    // Lock the row so no booking lands between the check and the delete
    let locked = sqlx::query_scalar::<_, Uuid>(
        "SELECT id FROM doctor_schedules WHERE id = $1 FOR UPDATE",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    if locked.is_none() {
        return Ok(None);
    }

    let referenced = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM appointments WHERE schedule_id = $1)",
    )
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    let removal = if referenced {
        sqlx::query(
            "UPDATE doctor_schedules SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        ScheduleRemoval::Deactivated
    } else {
        sqlx::query("DELETE FROM doctor_schedules WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        ScheduleRemoval::Deleted
    };

    tx.commit().await?;

    tracing::debug!("Schedule {} removed: {:?}", id, removal);
    Ok(Some(removal))
}
