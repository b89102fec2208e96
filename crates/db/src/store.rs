//! PostgreSQL-backed [`ClinicStore`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use clinicsync_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        admin::{DashboardStats, TransactionSummary},
        appointment::{Appointment, Booking, NewBooking, PaymentTransaction},
        doctor::{Doctor, DoctorSearch},
        schedule::{Schedule, ScheduleFilter, ScheduleRemoval},
    },
    store::ClinicStore,
};
use eyre::eyre;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    DbPool,
    models::{DbAppointment, DbPaymentTransaction},
    repositories::{
        admin,
        appointment::{self, CancelOutcome},
        doctor, schedule,
    },
};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // The increment matched no row; work out which precondition failed.
    async fn refused_booking(&self, schedule_id: Uuid) -> ClinicError {
        match schedule::get_schedule_by_id(&self.pool, schedule_id).await {
            Ok(Some(row)) if row.is_active => ClinicError::CapacityExceeded(format!(
                "Schedule {} has no available slots",
                schedule_id
            )),
            Ok(_) => ClinicError::NotFound(format!(
                "Schedule with ID {} not found or inactive",
                schedule_id
            )),
            Err(e) => ClinicError::Database(e),
        }
    }
}

fn into_booking(
    appointment: DbAppointment,
    transaction: DbPaymentTransaction,
) -> ClinicResult<Booking> {
    Ok(Booking {
        appointment: Appointment::try_from(appointment)?,
        transaction: PaymentTransaction::try_from(transaction)?,
    })
}

#[async_trait]
impl ClinicStore for PgStore {
    async fn insert_doctor(&self, doctor: &Doctor) -> ClinicResult<()> {
        doctor::insert_doctor(&self.pool, doctor).await?;
        Ok(())
    }

    async fn get_doctor(&self, id: Uuid) -> ClinicResult<Option<Doctor>> {
        Ok(doctor::get_doctor_by_id(&self.pool, id)
            .await?
            .map(Doctor::from))
    }

    async fn list_doctors(&self, include_inactive: bool) -> ClinicResult<Vec<Doctor>> {
        Ok(doctor::list_doctors(&self.pool, include_inactive)
            .await?
            .into_iter()
            .map(Doctor::from)
            .collect())
    }

    async fn search_doctors(&self, search: &DoctorSearch) -> ClinicResult<Vec<Doctor>> {
        Ok(doctor::search_doctors(&self.pool, search)
            .await?
            .into_iter()
            .map(Doctor::from)
            .collect())
    }

    async fn update_doctor(&self, doctor: &Doctor) -> ClinicResult<()> {
        match doctor::update_doctor(&self.pool, doctor).await? {
            0 => Err(ClinicError::NotFound(format!(
                "Doctor with ID {} not found",
                doctor.id
            ))),
            _ => Ok(()),
        }
    }

    async fn get_schedule(&self, id: Uuid) -> ClinicResult<Option<Schedule>> {
        Ok(schedule::get_schedule_by_id(&self.pool, id)
            .await?
            .map(Schedule::from))
    }

    async fn active_schedules_for(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> ClinicResult<Vec<Schedule>> {
        Ok(
            schedule::get_active_schedules_for_doctor(&self.pool, doctor_id, date)
                .await?
                .into_iter()
                .map(Schedule::from)
                .collect(),
        )
    }

    async fn list_schedules(&self, filter: &ScheduleFilter) -> ClinicResult<Vec<Schedule>> {
        Ok(schedule::list_schedules(
            &self.pool,
            filter.doctor_id,
            filter.date,
            filter.active_only,
        )
        .await?
        .into_iter()
        .map(Schedule::from)
        .collect())
    }

    async fn schedules_between(
        &self,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ClinicResult<Vec<Schedule>> {
        Ok(
            schedule::get_schedules_between(&self.pool, doctor_id, from, to)
                .await?
                .into_iter()
                .map(Schedule::from)
                .collect(),
        )
    }

    async fn insert_schedule(&self, new_schedule: &Schedule) -> ClinicResult<()> {
        schedule::insert_schedule(&self.pool, new_schedule).await?;
        Ok(())
    }

    async fn update_schedule(&self, updated: &Schedule) -> ClinicResult<Schedule> {
        if let Some(row) = schedule::update_schedule_guarded(&self.pool, updated).await? {
            return Ok(row.into());
        }

        match schedule::get_schedule_by_id(&self.pool, updated.id).await? {
            Some(current) => Err(ClinicError::Validation(format!(
                "Total slots ({}) cannot be less than already booked slots ({})",
                updated.total_slots, current.booked_slots
            ))),
            None => Err(ClinicError::NotFound(format!(
                "Schedule with ID {} not found",
                updated.id
            ))),
        }
    }

    async fn remove_schedule(&self, id: Uuid) -> ClinicResult<ScheduleRemoval> {
        schedule::remove_schedule(&self.pool, id)
            .await?
            .ok_or_else(|| ClinicError::NotFound(format!("Schedule with ID {} not found", id)))
    }

    async fn book_appointment(&self, booking: &NewBooking) -> ClinicResult<Booking> {
        match appointment::book_appointment(&self.pool, booking).await? {
            Some((appointment, transaction)) => into_booking(appointment, transaction),
            None => Err(self.refused_booking(booking.schedule_id).await),
        }
    }

    async fn get_booking(&self, appointment_id: Uuid) -> ClinicResult<Option<Booking>> {
        let Some(appointment) =
            appointment::get_appointment_by_id(&self.pool, appointment_id).await?
        else {
            return Ok(None);
        };

        let transaction = appointment::get_transaction_for_appointment(&self.pool, appointment_id)
            .await?
            .ok_or_else(|| eyre!("Appointment {} has no payment transaction", appointment_id))?;

        into_booking(appointment, transaction).map(Some)
    }

    async fn bookings_for_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Booking>> {
        let appointments = appointment::get_appointments_for_patient(&self.pool, patient_id).await?;
        let ids: Vec<Uuid> = appointments.iter().map(|a| a.id).collect();

        let mut transactions: HashMap<Uuid, DbPaymentTransaction> =
            appointment::get_transactions_for_appointments(&self.pool, &ids)
                .await?
                .into_iter()
                .map(|t| (t.appointment_id, t))
                .collect();

        appointments
            .into_iter()
            .map(|a| {
                let transaction = transactions
                    .remove(&a.id)
                    .ok_or_else(|| eyre!("Appointment {} has no payment transaction", a.id))?;
                into_booking(a, transaction)
            })
            .collect()
    }

    async fn cancel_appointment(
        &self,
        appointment_id: Uuid,
        at: DateTime<Utc>,
    ) -> ClinicResult<Appointment> {
        match appointment::cancel_appointment(&self.pool, appointment_id, at).await? {
            CancelOutcome::Cancelled(row) => Ok(Appointment::try_from(row)?),
            CancelOutcome::AlreadyCancelled => Err(ClinicError::Validation(format!(
                "Appointment {} is already cancelled",
                appointment_id
            ))),
            CancelOutcome::Missing => Err(ClinicError::NotFound(format!(
                "Appointment with ID {} not found",
                appointment_id
            ))),
        }
    }

    async fn list_transactions(&self) -> ClinicResult<Vec<TransactionSummary>> {
        let rows = admin::list_transactions(&self.pool).await?;
        let summaries = rows
            .into_iter()
            .map(TransactionSummary::try_from)
            .collect::<eyre::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    async fn dashboard_stats(&self, today: NaiveDate) -> ClinicResult<DashboardStats> {
        Ok(admin::dashboard_stats(&self.pool, today).await?.into())
    }
}
