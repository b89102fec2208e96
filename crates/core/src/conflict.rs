//! Conflict detection between schedules of the same doctor.
//!
//! Schedules occupy half-open `[start, end)` ranges, so two schedules that
//! only touch at a boundary do not conflict.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::{errors::ClinicResult, models::schedule::Schedule, store::ClinicStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        ranges_overlap(*self, *other)
    }
}

pub fn ranges_overlap(a: TimeRange, b: TimeRange) -> bool {
    a.start < b.end && a.end > b.start
}

/// Returns the first active schedule in `existing` that overlaps
/// `candidate`, skipping `exclude_schedule_id`.
pub fn find_conflict<'a>(
    existing: &'a [Schedule],
    candidate: TimeRange,
    exclude_schedule_id: Option<Uuid>,
) -> Option<&'a Schedule> {
    existing
        .iter()
        .filter(|s| s.is_active)
        .filter(|s| Some(s.id) != exclude_schedule_id)
        .find(|s| s.time_range().overlaps(&candidate))
}

/// Loads the doctor's active schedules for `date` and returns the one that
/// would overlap `[start_time, end_time)`, if any.
pub async fn find_conflicting_schedule(
    store: &dyn ClinicStore,
    doctor_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    exclude_schedule_id: Option<Uuid>,
) -> ClinicResult<Option<Schedule>> {
    let existing = store.active_schedules_for(doctor_id, date).await?;
    let candidate = TimeRange::new(start_time, end_time);

    Ok(find_conflict(&existing, candidate, exclude_schedule_id).cloned())
}

/// Whether `[start_time, end_time)` would overlap an active schedule of the
/// doctor on `date`. No side effects.
pub async fn has_conflict(
    store: &dyn ClinicStore,
    doctor_id: Uuid,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    exclude_schedule_id: Option<Uuid>,
) -> ClinicResult<bool> {
    let conflict = find_conflicting_schedule(
        store,
        doctor_id,
        date,
        start_time,
        end_time,
        exclude_schedule_id,
    )
    .await?;
    Ok(conflict.is_some())
}
