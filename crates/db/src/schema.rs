use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create doctors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            full_name VARCHAR(100) NOT NULL,
            specialization VARCHAR(100) NOT NULL,
            contact_number VARCHAR(15) NOT NULL,
            email VARCHAR(100) NOT NULL,
            qualifications VARCHAR(500) NOT NULL,
            details VARCHAR(500) NULL,
            hospital_name VARCHAR(100) NULL,
            address VARCHAR(200) NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create doctor_schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctor_schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doctor_id UUID NOT NULL REFERENCES doctors(id),
            schedule_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            slot_duration_minutes INTEGER NOT NULL,
            max_patients_per_slot INTEGER NOT NULL,
            total_slots INTEGER NOT NULL,
            booked_slots INTEGER NOT NULL DEFAULT 0,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            notes VARCHAR(200) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_slot_duration CHECK (slot_duration_minutes BETWEEN 15 AND 120),
            CONSTRAINT valid_patients_per_slot CHECK (max_patients_per_slot BETWEEN 1 AND 10),
            CONSTRAINT valid_booked_slots CHECK (booked_slots >= 0 AND booked_slots <= total_slots)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            patient_id UUID NOT NULL,
            schedule_id UUID NOT NULL REFERENCES doctor_schedules(id),
            patient_name VARCHAR(100) NOT NULL,
            patient_contact VARCHAR(15) NOT NULL,
            slot_number INTEGER NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'booked',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_appointment_status CHECK (status IN ('booked', 'cancelled', 'rescheduled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create payment_transactions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS payment_transactions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            appointment_id UUID NOT NULL UNIQUE REFERENCES appointments(id),
            patient_id UUID NOT NULL,
            payment_id VARCHAR(100) NOT NULL,
            nic VARCHAR(12) NOT NULL,
            contact_no VARCHAR(15) NOT NULL,
            email VARCHAR(100) NOT NULL,
            amount_cents BIGINT NOT NULL CHECK (amount_cents > 0),
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            payment_method VARCHAR(50) NOT NULL,
            bank_name VARCHAR(100) NOT NULL,
            bank_branch VARCHAR(50) NOT NULL,
            payment_date TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes; several statements, so this goes over the simple query protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_doctor_schedules_doctor_date ON doctor_schedules(doctor_id, schedule_date);
        CREATE INDEX IF NOT EXISTS idx_appointments_schedule_id ON appointments(schedule_id);
        CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
