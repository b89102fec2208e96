use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{conflict::TimeRange, models::doctor::Doctor, slots};

/// A doctor's bookable window on one date, split into fixed-length slots.
///
/// `booked_slots` is the single authoritative counter for the schedule.
/// The number of free slots is always derived from it, see
/// [`Schedule::available_slots`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
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

impl Schedule {
    pub fn available_slots(&self) -> i32 {
        slots::compute_available_slots(self.total_slots, self.booked_slots)
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

fn default_slot_duration() -> i32 {
    30
}

fn default_max_patients() -> i32 {
    1
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub doctor_id: Uuid,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_slot_duration")]
    pub slot_duration_minutes: i32,
    #[serde(default = "default_max_patients")]
    pub max_patients_per_slot: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i32,
    pub max_patients_per_slot: i32,
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub specialization: String,
    pub schedule_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i32,
    pub max_patients_per_slot: i32,
    pub total_slots: i32,
    pub booked_slots: i32,
    pub available_slots: i32,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleResponse {
    /// Builds the presentation form of a schedule. Doctor details are left
    /// empty when the doctor row is unavailable.
    pub fn new(schedule: Schedule, doctor: Option<&Doctor>) -> Self {
        let available_slots = schedule.available_slots();
        Self {
            id: schedule.id,
            doctor_id: schedule.doctor_id,
            doctor_name: doctor.map(|d| d.full_name.clone()).unwrap_or_default(),
            specialization: doctor
                .map(|d| d.specialization.clone())
                .unwrap_or_default(),
            schedule_date: schedule.schedule_date,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            slot_duration_minutes: schedule.slot_duration_minutes,
            max_patients_per_slot: schedule.max_patients_per_slot,
            total_slots: schedule.total_slots,
            booked_slots: schedule.booked_slots,
            available_slots,
            is_active: schedule.is_active,
            notes: schedule.notes,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}

/// Listing filter, also used as the query string of `GET /api/schedules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFilter {
    pub doctor_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub active_only: bool,
}

/// Outcome of removing a schedule: rows referenced by appointments are only
/// deactivated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleRemoval {
    Deleted,
    Deactivated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteScheduleResponse {
    pub id: Uuid,
    pub removal: ScheduleRemoval,
}
