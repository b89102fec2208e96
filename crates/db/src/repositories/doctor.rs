use crate::models::DbDoctor;
use clinicsync_core::models::doctor::{Doctor, DoctorSearch};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const DOCTOR_COLUMNS: &str = "id, full_name, specialization, contact_number, email, \
    qualifications, details, hospital_name, address, is_active, created_at, updated_at";

pub async fn insert_doctor(pool: &Pool<Postgres>, doctor: &Doctor) -> Result<DbDoctor> {
    tracing::debug!("Creating doctor: id={}, name={}", doctor.id, doctor.full_name);

    let row = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        INSERT INTO doctors (id, full_name, specialization, contact_number, email,
            qualifications, details, hospital_name, address, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING {}
        "#,
        DOCTOR_COLUMNS
    ))
    .bind(doctor.id)
    .bind(&doctor.full_name)
    .bind(&doctor.specialization)
    .bind(&doctor.contact_number)
    .bind(&doctor.email)
    .bind(&doctor.qualifications)
    .bind(&doctor.details)
    .bind(&doctor.hospital_name)
    .bind(&doctor.address)
    .bind(doctor.is_active)
    .bind(doctor.created_at)
    .bind(doctor.updated_at)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_doctor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbDoctor>> {
    tracing::debug!("Getting doctor by id: {}", id);

    let row = sqlx::query_as::<_, DbDoctor>(&format!(
        "SELECT {} FROM doctors WHERE id = $1",
        DOCTOR_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn list_doctors(pool: &Pool<Postgres>, include_inactive: bool) -> Result<Vec<DbDoctor>> {
    let rows = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        SELECT {}
        FROM doctors
        WHERE $1 OR is_active
        ORDER BY full_name ASC
        "#,
        DOCTOR_COLUMNS
    ))
    .bind(include_inactive)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the number of rows written (0 when the doctor does not exist).
pub async fn update_doctor(pool: &Pool<Postgres>, doctor: &Doctor) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE doctors
        SET full_name = $2, specialization = $3, contact_number = $4, email = $5,
            qualifications = $6, details = $7, hospital_name = $8, address = $9,
            is_active = $10, updated_at = $11
        WHERE id = $1
        "#,
    )
    .bind(doctor.id)
    .bind(&doctor.full_name)
    .bind(&doctor.specialization)
    .bind(&doctor.contact_number)
    .bind(&doctor.email)
    .bind(&doctor.qualifications)
    .bind(&doctor.details)
    .bind(&doctor.hospital_name)
    .bind(&doctor.address)
    .bind(doctor.is_active)
    .bind(doctor.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

// `%`, `_` and `\` are wildcards in ILIKE; match them literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub async fn search_doctors(pool: &Pool<Postgres>, search: &DoctorSearch) -> Result<Vec<DbDoctor>> {
    tracing::debug!(
        "Searching doctors: q={:?}, specialization={:?}",
        search.q,
        search.specialization
    );

    let rows = sqlx::query_as::<_, DbDoctor>(&format!(
        r#"
        SELECT {}
        FROM doctors
        WHERE is_active
          AND ($1::text IS NULL OR full_name ILIKE $1 OR specialization ILIKE $1)
          AND ($2::text IS NULL OR LOWER(specialization) = LOWER($2))
        ORDER BY full_name ASC
        "#,
        DOCTOR_COLUMNS
    ))
    .bind(search.q.as_deref().map(like_pattern))
    .bind(search.specialization.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
