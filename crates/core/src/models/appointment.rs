use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ClinicError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Booked,
    Cancelled,
    Rescheduled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "booked",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Rescheduled => "rescheduled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(AppointmentStatus::Booked),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "rescheduled" => Ok(AppointmentStatus::Rescheduled),
            other => Err(ClinicError::Validation(format!(
                "Unknown appointment status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl FromStr for TransactionStatus {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            other => Err(ClinicError::Validation(format!(
                "Unknown transaction status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub schedule_id: Uuid,
    pub patient_name: String,
    pub patient_contact: String,
    pub slot_number: i32,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub patient_id: Uuid,
    pub payment_id: String,
    pub nic: String,
    pub contact_no: String,
    pub email: String,
    pub amount_cents: i64,
    pub status: TransactionStatus,
    pub payment_method: String,
    pub bank_name: String,
    pub bank_branch: String,
    pub payment_date: DateTime<Utc>,
}

/// An appointment together with the payment that paid for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub appointment: Appointment,
    pub transaction: PaymentTransaction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub account_name: String,
    pub account_number: String,
    pub bank_name: String,
    pub bank_branch: String,
    /// Amount in minor currency units.
    pub amount_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub schedule_id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub nic: String,
    pub email: String,
    pub contact_no: String,
    pub payment: PaymentDetails,
}

/// Everything the store needs to write a booking in one unit. The slot
/// number is assigned by the store when the counter is incremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub appointment_id: Uuid,
    pub transaction_id: Uuid,
    pub schedule_id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub patient_contact: String,
    pub payment_id: String,
    pub nic: String,
    pub email: String,
    pub amount_cents: i64,
    pub bank_name: String,
    pub bank_branch: String,
    pub created_at: DateTime<Utc>,
}

pub const PAYMENT_METHOD_BANK_TRANSFER: &str = "bank-transfer";

impl NewBooking {
    pub fn appointment(&self, slot_number: i32) -> Appointment {
        Appointment {
            id: self.appointment_id,
            patient_id: self.patient_id,
            schedule_id: self.schedule_id,
            patient_name: self.patient_name.clone(),
            patient_contact: self.patient_contact.clone(),
            slot_number,
            status: AppointmentStatus::Booked,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }

    pub fn transaction(&self) -> PaymentTransaction {
        PaymentTransaction {
            id: self.transaction_id,
            appointment_id: self.appointment_id,
            patient_id: self.patient_id,
            payment_id: self.payment_id.clone(),
            nic: self.nic.clone(),
            contact_no: self.patient_contact.clone(),
            email: self.email.clone(),
            amount_cents: self.amount_cents,
            status: TransactionStatus::Completed,
            payment_method: PAYMENT_METHOD_BANK_TRANSFER.to_string(),
            bank_name: self.bank_name.clone(),
            bank_branch: self.bank_branch.clone(),
            payment_date: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub appointment_id: Uuid,
    pub transaction_id: Uuid,
    pub payment_id: String,
    pub status: TransactionStatus,
    pub amount_cents: i64,
    pub payment_date: DateTime<Utc>,
    pub slot_number: i32,
    pub appointment_status: AppointmentStatus,
    pub message: String,
}

impl BookingResponse {
    pub fn new(booking: Booking, message: impl Into<String>) -> Self {
        Self {
            appointment_id: booking.appointment.id,
            transaction_id: booking.transaction.id,
            payment_id: booking.transaction.payment_id,
            status: booking.transaction.status,
            amount_cents: booking.transaction.amount_cents,
            payment_date: booking.transaction.payment_date,
            slot_number: booking.appointment.slot_number,
            appointment_status: booking.appointment.status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentResponse {
    pub appointment_id: Uuid,
    pub schedule_id: Uuid,
    pub status: AppointmentStatus,
    pub updated_at: DateTime<Utc>,
}

/// One row of a patient's appointment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientAppointment {
    pub appointment_id: Uuid,
    pub schedule_id: Uuid,
    pub doctor_name: String,
    pub specialization: String,
    pub schedule_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub slot_number: i32,
    pub status: AppointmentStatus,
    pub amount_cents: i64,
    pub payment_id: String,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
