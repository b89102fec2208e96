use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clinicsync_core::models::{
    admin::{DashboardStats, TransactionSummary},
    appointment::{Appointment, PaymentTransaction},
    doctor::Doctor,
    schedule::Schedule,
};
use eyre::{eyre, Report};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub full_name: String,
    pub specialization: String,
    pub contact_number: String,
    pub email: String,
    pub qualifications: String,
    pub details: Option<String>,
    pub hospital_name: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            full_name: row.full_name,
            specialization: row.specialization,
            contact_number: row.contact_number,
            email: row.email,
            qualifications: row.qualifications,
            details: row.details,
            hospital_name: row.hospital_name,
            address: row.address,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i32,
    pub max_patients_per_slot: i32,
    pub total_slots: i32,
    pub booked_slots: i32,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSchedule> for Schedule {
    fn from(row: DbSchedule) -> Self {
        Schedule {
            id: row.id,
            doctor_id: row.doctor_id,
            schedule_date: row.schedule_date,
            start_time: row.start_time,
            end_time: row.end_time,
            slot_duration_minutes: row.slot_duration_minutes,
            max_patients_per_slot: row.max_patients_per_slot,
            total_slots: row.total_slots,
            booked_slots: row.booked_slots,
            is_active: row.is_active,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
    pub patient_name: String,
    pub patient_contact: String,
    pub slot_number: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| eyre!("Appointment {} has a bad status: {}", row.id, e))?;

        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            schedule_id: row.schedule_id,
            patient_name: row.patient_name,
            patient_contact: row.patient_contact,
            slot_number: row.slot_number,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPaymentTransaction {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub patient_id: Uuid,
    pub payment_id: String,
    pub nic: String,
    pub contact_no: String,
    pub email: String,
    pub amount_cents: i64,
    pub status: String,
    pub payment_method: String,
    pub bank_name: String,
    pub bank_branch: String,
    pub payment_date: DateTime<Utc>,
}

impl TryFrom<DbPaymentTransaction> for PaymentTransaction {
    type Error = Report;

    fn try_from(row: DbPaymentTransaction) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| eyre!("Transaction {} has a bad status: {}", row.id, e))?;

        Ok(PaymentTransaction {
            id: row.id,
            appointment_id: row.appointment_id,
            patient_id: row.patient_id,
            payment_id: row.payment_id,
            nic: row.nic,
            contact_no: row.contact_no,
            email: row.email,
            amount_cents: row.amount_cents,
            status,
            payment_method: row.payment_method,
            bank_name: row.bank_name,
            bank_branch: row.bank_branch,
            payment_date: row.payment_date,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbTransactionSummary {
    pub transaction_id: Uuid,
    pub appointment_id: Uuid,
    pub payment_id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub amount_cents: i64,
    pub payment_method: String,
    pub status: String,
    pub payment_date: DateTime<Utc>,
}

impl TryFrom<DbTransactionSummary> for TransactionSummary {
    type Error = Report;

    fn try_from(row: DbTransactionSummary) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| eyre!("Transaction {} has a bad status: {}", row.transaction_id, e))?;

        Ok(TransactionSummary {
            transaction_id: row.transaction_id,
            appointment_id: row.appointment_id,
            payment_id: row.payment_id,
            patient_name: row.patient_name,
            doctor_name: row.doctor_name,
            amount_cents: row.amount_cents,
            payment_method: row.payment_method,
            status,
            payment_date: row.payment_date,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbDashboardStats {
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

impl From<DbDashboardStats> for DashboardStats {
    fn from(row: DbDashboardStats) -> Self {
        DashboardStats {
            total_doctors: row.total_doctors,
            active_doctors: row.active_doctors,
            total_schedules: row.total_schedules,
            active_schedules: row.active_schedules,
            total_slots: row.total_slots,
            booked_slots: row.booked_slots,
            total_appointments: row.total_appointments,
            booked_appointments: row.booked_appointments,
            today_appointments: row.today_appointments,
        }
    }
}
