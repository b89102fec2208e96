//! The storage collaborator.
//!
//! Services only talk to storage through [`ClinicStore`]. Implementations
//! live in the `clinicsync-db` crate (PostgreSQL and in-memory).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    errors::ClinicResult,
    models::{
        admin::{DashboardStats, TransactionSummary},
        appointment::{Appointment, Booking, NewBooking},
        doctor::{Doctor, DoctorSearch},
        schedule::{Schedule, ScheduleFilter, ScheduleRemoval},
    },
};

#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn insert_doctor(&self, doctor: &Doctor) -> ClinicResult<()>;

    async fn get_doctor(&self, id: Uuid) -> ClinicResult<Option<Doctor>>;

    async fn list_doctors(&self, include_inactive: bool) -> ClinicResult<Vec<Doctor>>;

    /// Overwrites a doctor row. `NotFound` if it does not exist.
    async fn update_doctor(&self, doctor: &Doctor) -> ClinicResult<()>;

    /// Active doctors matching `search`, ordered by name. Blank fields are
    /// expected to be `None` already.
    async fn search_doctors(&self, search: &DoctorSearch) -> ClinicResult<Vec<Doctor>>;

    async fn get_schedule(&self, id: Uuid) -> ClinicResult<Option<Schedule>>;

    /// Active schedules of `doctor_id` on `date`, ordered by start time.
    async fn active_schedules_for(
        &self,
        doctor_id: Uuid,
        date: NaiveDate,
    ) -> ClinicResult<Vec<Schedule>>;

    /// Schedules matching `filter`, ordered by date then start time.
    async fn list_schedules(&self, filter: &ScheduleFilter) -> ClinicResult<Vec<Schedule>>;

    /// Active schedules of `doctor_id` dated within `[from, to]`.
    async fn schedules_between(
        &self,
        doctor_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ClinicResult<Vec<Schedule>>;

    async fn insert_schedule(&self, schedule: &Schedule) -> ClinicResult<()>;

    /// Writes the editable fields of `schedule` (everything except
    /// `booked_slots`, `doctor_id` and `created_at`).
    ///
    /// The write only happens if the stored `booked_slots` still fits in the
    /// new `total_slots`; otherwise `Validation` and nothing changes.
    async fn update_schedule(&self, schedule: &Schedule) -> ClinicResult<Schedule>;

    /// Deletes the schedule, or deactivates it when appointments reference it.
    async fn remove_schedule(&self, id: Uuid) -> ClinicResult<ScheduleRemoval>;

    /// Reserves a slot on the schedule and records the appointment and its
    /// payment as one unit. The appointment gets the lowest slot number no
    /// `booked` appointment of the schedule holds.
    ///
    /// # Errors
    ///
    /// * `NotFound` - the schedule is missing or inactive
    /// * `CapacityExceeded` - no slot left; nothing is written
    async fn book_appointment(&self, booking: &NewBooking) -> ClinicResult<Booking>;

    async fn get_booking(&self, appointment_id: Uuid) -> ClinicResult<Option<Booking>>;

    /// A patient's bookings, newest first.
    async fn bookings_for_patient(&self, patient_id: Uuid) -> ClinicResult<Vec<Booking>>;

    /// Marks the appointment cancelled and releases its slot as one unit.
    ///
    /// # Errors
    ///
    /// * `NotFound` - unknown appointment
    /// * `Validation` - the appointment is already cancelled
    async fn cancel_appointment(
        &self,
        appointment_id: Uuid,
        at: DateTime<Utc>,
    ) -> ClinicResult<Appointment>;

    /// Every payment with its patient and doctor names, newest first.
    async fn list_transactions(&self) -> ClinicResult<Vec<TransactionSummary>>;

    /// Dashboard counters; `today_appointments` counts booked appointments
    /// on schedules dated `today`.
    async fn dashboard_stats(&self, today: NaiveDate) -> ClinicResult<DashboardStats>;
}
