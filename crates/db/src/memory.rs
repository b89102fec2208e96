//! In-process [`ClinicStore`] for tests and local runs without PostgreSQL.
//!
//! Every method holds one mutex for its whole read-check-write, which gives
//! the same all-or-nothing behaviour as a database transaction.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use clinicsync_core::{
    booking::first_free_slot,
    errors::{ClinicError, ClinicResult},
    models::{
        admin::{DashboardStats, TransactionSummary},
        appointment::{Appointment, AppointmentStatus, Booking, NewBooking, PaymentTransaction},
        doctor::{Doctor, DoctorSearch},
        schedule::{Schedule, ScheduleFilter, ScheduleRemoval},
    },
    store::ClinicStore,
};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    doctors: HashMap<Uuid, Doctor>,
    schedules: HashMap<Uuid, Schedule>,
    appointments: HashMap<Uuid, Appointment>,
    transactions: HashMap<Uuid, PaymentTransaction>,
}

impl MemoryState {
    fn booking(&self, appointment_id: Uuid) -> ClinicResult<Option<Booking>> {
        let Some(appointment) = self.appointments.get(&appointment_id) else {
            return Ok(None);
        };
        let transaction = self
            .transactions
            .get(&appointment_id)
            .ok_or_else(|| {
                eyre::eyre!("Appointment {} has no payment transaction", appointment_id)
            })?;

        Ok(Some(Booking {
            appointment: appointment.clone(),
            transaction: transaction.clone(),
        }))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_slot(mut schedules: Vec<Schedule>) -> Vec<Schedule> {
    schedules.sort_by_key(|s| (s.schedule_date, s.start_time));
    schedules
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn insert_doctor(&self, doctor: &Doctor) -> ClinicResult<()> {
        let mut state = self.state.lock().await;
        state.doctors.insert(doctor.id, doctor.clone());
        Ok(())
    }

    async fn get_doctor(&self, id: Uuid) -> ClinicResult<Option<Doctor>> {
        Ok(self.state.lock().await.doctors.get(&id).cloned())
    }

    async fn list_doctors(&self, include_inactive: bool) -> ClinicResult<Vec<Doctor>> {
        let state = self.state.lock().await;
        let mut doctors: Vec<Doctor> = state
            .doctors
            .values()
            .filter(|d| include_inactive || d.is_active)
            .cloned()
            .collect();
        doctors.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(doctors)
    }

    async fn search_doctors(&self, search: &DoctorSearch) -> ClinicResult<Vec<Doctor>> {
        let q = search.q.as_deref().map(str::to_lowercase);
        let specialization = search.specialization.as_deref().map(str::to_lowercase);

        let mut doctors: Vec<Doctor> = self
            .state
            .lock()
            .await
            .doctors
            .values()
            .filter(|d| d.is_active)
            .filter(|d| {
                q.as_deref().is_none_or(|q| {
                    d.full_name.to_lowercase().contains(q)
                        || d.specialization.to_lowercase().contains(q)
                })
            })
            .filter(|d| {
                specialization
                    .as_deref()
                    .is_none_or(|s| d.specialization.to_lowercase() == s)
            })
            .cloned()
            .collect();
        doctors.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(doctors)
    }

    async fn update_doctor(&self, doctor: &Doctor) -> ClinicResult<()> {
        let mut state = self.state.lock().await;
        match state.doctors.get_mut(&doctor.id) {
            Some(stored) => {
                *stored = doctor.clone();
                Ok(())
            }
            None => Err(ClinicError::NotFound(format!(
                "Doctor with ID {} not found",
                doctor.id
            ))),
        }
    }

    async fn get_schedule(&self, id: Uuid) -> ClinicResult<Option<Schedule>> {
        Ok(self.state.lock().await.schedules.get(&id).cloned())
    }

    async fn active_schedules_for(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> ClinicResult<Vec<Schedule>> {
        let state = self.state.lock().await;
        Ok(sorted_by_slot(
            state
                .schedules
                .values()
                .filter(|s| s.doctor_id == doctor_id && s.schedule_date == date && s.is_active)
                .cloned()
                .collect(),
        ))
    }

    async fn list_schedules(&self, filter: &ScheduleFilter) -> ClinicResult<Vec<Schedule>> {
        let state = self.state.lock().await;
        Ok(sorted_by_slot(
            state
                .schedules
                .values()
                .filter(|s| filter.doctor_id.is_none_or(|id| s.doctor_id == id))
                .filter(|s| filter.date.is_none_or(|d| s.schedule_date == d))
                .filter(|s| !filter.active_only || s.is_active)
                .cloned()
                .collect(),
        ))
    }

    async fn schedules_between(
        &self,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ClinicResult<Vec<Schedule>> {
        let state = self.state.lock().await;
        Ok(sorted_by_slot(
            state
                .schedules
                .values()
                .filter(|s| s.doctor_id == doctor_id && s.is_active)
                .filter(|s| s.schedule_date >= from && s.schedule_date <= to)
                .cloned()
                .collect(),
        ))
    }

    async fn insert_schedule(&self, schedule: &Schedule) -> ClinicResult<()> {
        let mut state = self.state.lock().await;
        state.schedules.insert(schedule.id, schedule.clone());
        Ok(())
    }

    async fn update_schedule(&self, schedule: &Schedule) -> ClinicResult<Schedule> {
        let mut state = self.state.lock().await;
        let stored = state.schedules.get_mut(&schedule.id).ok_or_else(|| {
            ClinicError::NotFound(format!("Schedule with ID {} not found", schedule.id))
        })?;

        if stored.booked_slots > schedule.total_slots {
            return Err(ClinicError::Validation(format!(
                "Total slots ({}) cannot be less than already booked slots ({})",
                schedule.total_slots, stored.booked_slots
            )));
        }

        *stored = Schedule {
            booked_slots: stored.booked_slots,
            doctor_id: stored.doctor_id,
            created_at: stored.created_at,
            ..schedule.clone()
        };
        Ok(stored.clone())
    }

    async fn remove_schedule(&self, id: Uuid) -> ClinicResult<ScheduleRemoval> {
        let mut state = self.state.lock().await;
        if !state.schedules.contains_key(&id) {
            return Err(ClinicError::NotFound(format!(
                "Schedule with ID {} not found",
                id
            )));
        }

        let referenced = state.appointments.values().any(|a| a.schedule_id == id);
        if referenced {
            if let Some(schedule) = state.schedules.get_mut(&id) {
                schedule.is_active = false;
                schedule.updated_at = Utc::now();
            }
            Ok(ScheduleRemoval::Deactivated)
        } else {
            state.schedules.remove(&id);
            Ok(ScheduleRemoval::Deleted)
        }
    }

    async fn book_appointment(&self, booking: &NewBooking) -> ClinicResult<Booking> {
        let mut state = self.state.lock().await;
        let slot_number = first_free_slot(
            state
                .appointments
                .values()
                .filter(|a| {
                    a.schedule_id == booking.schedule_id && a.status == AppointmentStatus::Booked
                })
                .map(|a| a.slot_number),
        );

        let schedule = state
            .schedules
            .get_mut(&booking.schedule_id)
            .filter(|s| s.is_active)
            .ok_or_else(|| {
                ClinicError::NotFound(format!(
                    "Schedule with ID {} not found or inactive",
                    booking.schedule_id
                ))
            })?;

        schedule.reserve_slot()?;
        schedule.updated_at = booking.created_at;

        let appointment = booking.appointment(slot_number);
        let transaction = booking.transaction();
        state.appointments.insert(appointment.id, appointment.clone());
        state.transactions.insert(appointment.id, transaction.clone());

        Ok(Booking {
            appointment,
            transaction,
        })
    }

    async fn get_booking(&self, appointment_id: Uuid) -> ClinicResult<Option<Booking>> {
        self.state.lock().await.booking(appointment_id)
    }

    async fn bookings_for_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Booking>> {
        let state = self.state.lock().await;
        let mut appointments: Vec<&Appointment> = state
            .appointments
            .values()
            .filter(|a| a.patient_id == patient_id)
            .collect();
        appointments.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut bookings = Vec::with_capacity(appointments.len());
        for appointment in appointments {
            if let Some(booking) = state.booking(appointment.id)? {
                bookings.push(booking);
            }
        }
        Ok(bookings)
    }

    async fn cancel_appointment(
        &self,
        appointment_id: Uuid,
        at: DateTime<Utc>,
    ) -> ClinicResult<Appointment> {
        let mut state = self.state.lock().await;
        let appointment = state.appointments.get_mut(&appointment_id).ok_or_else(|| {
            ClinicError::NotFound(format!("Appointment with ID {} not found", appointment_id))
        })?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(ClinicError::Validation(format!(
                "Appointment {} is already cancelled",
                appointment_id
            )));
        }

        appointment.status = AppointmentStatus::Cancelled;
        appointment.updated_at = at;
        let cancelled = appointment.clone();

        if let Some(schedule) = state.schedules.get_mut(&cancelled.schedule_id) {
            schedule.release_slot();
            schedule.updated_at = at;
        }

        Ok(cancelled)
    }

    async fn list_transactions(&self) -> ClinicResult<Vec<TransactionSummary>> {
        let state = self.state.lock().await;
        let mut summaries = Vec::with_capacity(state.transactions.len());
        for transaction in state.transactions.values() {
            let appointment = state
                .appointments
                .get(&transaction.appointment_id)
                .ok_or_else(|| {
                    eyre::eyre!("Transaction {} has no appointment", transaction.id)
                })?;
            let doctor_name = state
                .schedules
                .get(&appointment.schedule_id)
                .and_then(|s| state.doctors.get(&s.doctor_id))
                .map_or_else(|| "Unknown".to_string(), |d| d.full_name.clone());

            summaries.push(TransactionSummary {
                transaction_id: transaction.id,
                appointment_id: transaction.appointment_id,
                payment_id: transaction.payment_id.clone(),
                patient_name: appointment.patient_name.clone(),
                doctor_name,
                amount_cents: transaction.amount_cents,
                payment_method: transaction.payment_method.clone(),
                status: transaction.status,
                payment_date: transaction.payment_date,
            });
        }
        summaries.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(summaries)
    }

    async fn dashboard_stats(&self, today: NaiveDate) -> ClinicResult<DashboardStats> {
        let state = self.state.lock().await;
        let active: Vec<&Schedule> = state.schedules.values().filter(|s| s.is_active).collect();
        let booked: Vec<&Appointment> = state
            .appointments
            .values()
            .filter(|a| a.status == AppointmentStatus::Booked)
            .collect();

        Ok(DashboardStats {
            total_doctors: state.doctors.len() as i64,
            active_doctors: state.doctors.values().filter(|d| d.is_active).count() as i64,
            total_schedules: state.schedules.len() as i64,
            active_schedules: active.len() as i64,
            total_slots: active.iter().map(|s| i64::from(s.total_slots)).sum(),
            booked_slots: active.iter().map(|s| i64::from(s.booked_slots)).sum(),
            total_appointments: state.appointments.len() as i64,
            booked_appointments: booked.len() as i64,
            today_appointments: booked
                .iter()
                .filter(|a| {
                    state
                        .schedules
                        .get(&a.schedule_id)
                        .is_some_and(|s| s.schedule_date == today)
                })
                .count() as i64,
        })
    }
}
