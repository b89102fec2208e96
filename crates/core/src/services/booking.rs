//! Patient booking flow.
//!
//! A booking is capacity-checked, paid for, then written through
//! [`ClinicStore::book_appointment`], which re-checks capacity and increments
//! the counter in the same unit as the appointment insert. If that final
//! write is refused the captured payment is voided.

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{
            BookingRequest, BookingResponse, CancelAppointmentResponse, NewBooking,
            PatientAppointment,
        },
        doctor::Doctor,
        schedule::Schedule,
    },
    payment::PaymentGateway,
    store::ClinicStore,
    validation,
};

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn ClinicStore>,
    payments: Arc<dyn PaymentGateway>,
}

impl BookingService {
    pub fn new(store: Arc<dyn ClinicStore>, payments: Arc<dyn PaymentGateway>) -> Self {
        Self { store, payments }
    }

    /// Books one slot on a schedule.
    ///
    /// # Errors
    ///
    /// * `Validation` - malformed patient or payment details
    /// * `NotFound` - the schedule is missing or inactive
    /// * `CapacityExceeded` - the schedule is full; no appointment is created
    pub async fn book(&self, request: BookingRequest) -> ClinicResult<BookingResponse> {
        validate_booking_request(&request)?;

        let schedule = self
            .store
            .get_schedule(request.schedule_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or_else(|| {
                ClinicError::NotFound(format!(
                    "Schedule with ID {} not found or inactive",
                    request.schedule_id
                ))
            })?;

        if !schedule.has_capacity() {
            return Err(ClinicError::CapacityExceeded(format!(
                "Schedule {} has no available slots",
                schedule.id
            )));
        }

        let payment_id = self.payments.capture(&request.payment).await?;

        let new_booking = NewBooking {
            appointment_id: Uuid::new_v4(),
            transaction_id: Uuid::new_v4(),
            schedule_id: schedule.id,
            patient_id: request.patient_id,
            patient_name: request.patient_name.trim().to_string(),
            patient_contact: request.contact_no.trim().to_string(),
            payment_id: payment_id.clone(),
            nic: request.nic.trim().to_string(),
            email: request.email.trim().to_string(),
            amount_cents: request.payment.amount_cents,
            bank_name: request.payment.bank_name,
            bank_branch: request.payment.bank_branch,
            created_at: Utc::now(),
        };

        match self.store.book_appointment(&new_booking).await {
            Ok(booking) => {
                info!(
                    "Booked appointment {} on schedule {} (slot {})",
                    booking.appointment.id, schedule.id, booking.appointment.slot_number
                );
                Ok(BookingResponse::new(booking, "Booking successful"))
            }
            Err(err) => {
                warn!(
                    "Booking on schedule {} failed after payment {}: {}",
                    schedule.id, payment_id, err
                );
                if let Err(void_err) = self.payments.void(&payment_id).await {
                    error!("Failed to void payment {}: {}", payment_id, void_err);
                }
                Err(err)
            }
        }
    }

    pub async fn get_booking(&self, appointment_id: Uuid) -> ClinicResult<BookingResponse> {
        let booking = self
            .store
            .get_booking(appointment_id)
            .await?
            .ok_or_else(|| {
                ClinicError::NotFound(format!("Booking with ID {} not found", appointment_id))
            })?;
        Ok(BookingResponse::new(booking, "Booking found"))
    }

    /// The patient's appointments, newest first, with doctor and schedule
    /// details filled in where still available.
    pub async fn patient_appointments(
        &self,
        patient_id: Uuid,
    ) -> ClinicResult<Vec<PatientAppointment>> {
        let bookings = self.store.bookings_for_patient(patient_id).await?;

        let mut schedules: HashMap<Uuid, Option<Schedule>> = HashMap::new();
        let mut doctors: HashMap<Uuid, Option<Doctor>> = HashMap::new();
        let mut appointments = Vec::with_capacity(bookings.len());

        for booking in bookings {
            let schedule_id = booking.appointment.schedule_id;
            if !schedules.contains_key(&schedule_id) {
                let schedule = self.store.get_schedule(schedule_id).await?;
                schedules.insert(schedule_id, schedule);
            }
            let schedule = schedules.get(&schedule_id).and_then(Option::as_ref);

            let doctor = match schedule {
                Some(s) => {
                    if !doctors.contains_key(&s.doctor_id) {
                        let doctor = self.store.get_doctor(s.doctor_id).await?;
                        doctors.insert(s.doctor_id, doctor);
                    }
                    doctors.get(&s.doctor_id).and_then(Option::as_ref)
                }
                None => None,
            };

            appointments.push(PatientAppointment {
                appointment_id: booking.appointment.id,
                schedule_id,
                doctor_name: doctor
                    .map(|d| d.full_name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                specialization: doctor
                    .map(|d| d.specialization.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                schedule_date: schedule.map(|s| s.schedule_date),
                start_time: schedule.map(|s| s.start_time),
                slot_number: booking.appointment.slot_number,
                status: booking.appointment.status,
                amount_cents: booking.transaction.amount_cents,
                payment_id: booking.transaction.payment_id,
                payment_date: booking.transaction.payment_date,
                created_at: booking.appointment.created_at,
            });
        }

        Ok(appointments)
    }

    /// Cancels an appointment and frees its slot.
    pub async fn cancel(&self, appointment_id: Uuid) -> ClinicResult<CancelAppointmentResponse> {
        let appointment = self
            .store
            .cancel_appointment(appointment_id, Utc::now())
            .await?;
        info!(
            "Cancelled appointment {} on schedule {}",
            appointment.id, appointment.schedule_id
        );

        Ok(CancelAppointmentResponse {
            appointment_id: appointment.id,
            schedule_id: appointment.schedule_id,
            status: appointment.status,
            updated_at: appointment.updated_at,
        })
    }
}

fn validate_booking_request(request: &BookingRequest) -> ClinicResult<()> {
    validation::required_text("patient_name", &request.patient_name, 100)?;
    validation::required_text("nic", &request.nic, 12)?;
    validation::email("email", &request.email, 100)?;
    validation::required_text("contact_no", &request.contact_no, 15)?;

    let payment = &request.payment;
    validation::required_text("payment.account_name", &payment.account_name, 100)?;
    validation::required_text("payment.account_number", &payment.account_number, 24)?;
    validation::required_text("payment.bank_name", &payment.bank_name, 100)?;
    validation::required_text("payment.bank_branch", &payment.bank_branch, 50)?;
    if payment.amount_cents <= 0 {
        return Err(ClinicError::Validation(
            "payment.amount_cents must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
