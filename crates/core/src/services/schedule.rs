//! Schedule administration.
//!
//! Create and update both go through the same pipeline: field validation,
//! existence checks, the conflict predicate, slot arithmetic, and only then
//! a single store write.

use std::{collections::HashMap, sync::Arc};

use chrono::{Duration, NaiveTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    conflict,
    errors::{ClinicError, ClinicResult},
    models::{
        doctor::Doctor,
        schedule::{
            CreateScheduleRequest, DeleteScheduleResponse, Schedule, ScheduleFilter,
            ScheduleResponse, UpdateScheduleRequest,
        },
    },
    slots,
    store::ClinicStore,
    validation,
};

pub const DEFAULT_UPCOMING_DAYS: i64 = 30;
pub const MAX_UPCOMING_DAYS: i64 = 365;

#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<dyn ClinicStore>,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    /// Creates an active schedule with no bookings.
    ///
    /// # Errors
    ///
    /// * `Validation` - bad time window, slot settings or notes
    /// * `NotFound` - the doctor does not exist or is inactive
    /// * `Conflict` - the window overlaps another active schedule of the
    ///   doctor on that date
    pub async fn create_schedule(
        &self,
        request: CreateScheduleRequest,
    ) -> ClinicResult<ScheduleResponse> {
        let total_slots = validated_total_slots(
            request.start_time,
            request.end_time,
            request.slot_duration_minutes,
            request.max_patients_per_slot,
            request.notes.as_deref(),
        )?;

        let doctor = self
            .store
            .get_doctor(request.doctor_id)
            .await?
            .filter(|d| d.is_active)
            .ok_or_else(|| {
                ClinicError::NotFound(format!(
                    "Doctor with ID {} not found or inactive",
                    request.doctor_id
                ))
            })?;

        if let Some(existing) = conflict::find_conflicting_schedule(
            self.store.as_ref(),
            doctor.id,
            request.schedule_date,
            request.start_time,
            request.end_time,
            None,
        )
        .await?
        {
            return Err(conflict_error(&existing));
        }

        let now = Utc::now();
        let schedule = Schedule {
            id: Uuid::new_v4(),
            doctor_id: doctor.id,
            schedule_date: request.schedule_date,
            start_time: request.start_time,
            end_time: request.end_time,
            slot_duration_minutes: request.slot_duration_minutes,
            max_patients_per_slot: request.max_patients_per_slot,
            total_slots,
            booked_slots: 0,
            is_active: true,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_schedule(&schedule).await?;
        info!(
            "Created schedule {} for doctor {} on {} ({} slots)",
            schedule.id, doctor.id, schedule.schedule_date, total_slots
        );

        Ok(ScheduleResponse::new(schedule, Some(&doctor)))
    }

    /// Replaces the editable fields of a schedule.
    ///
    /// The conflict check ignores the schedule itself and is skipped when the
    /// result is inactive. Shrinking the window below the number of booked
    /// slots is rejected before anything is written.
    pub async fn update_schedule(
        &self,
        id: Uuid,
        request: UpdateScheduleRequest,
    ) -> ClinicResult<ScheduleResponse> {
        let total_slots = validated_total_slots(
            request.start_time,
            request.end_time,
            request.slot_duration_minutes,
            request.max_patients_per_slot,
            request.notes.as_deref(),
        )?;

        let current = self.find_schedule(id).await?;

        if request.is_active {
            if let Some(existing) = conflict::find_conflicting_schedule(
                self.store.as_ref(),
                current.doctor_id,
                request.schedule_date,
                request.start_time,
                request.end_time,
                Some(id),
            )
            .await?
            {
                return Err(conflict_error(&existing));
            }
        }

        if total_slots < current.booked_slots {
            return Err(ClinicError::Validation(format!(
                "Total slots ({}) cannot be less than already booked slots ({})",
                total_slots, current.booked_slots
            )));
        }

        let updated = Schedule {
            schedule_date: request.schedule_date,
            start_time: request.start_time,
            end_time: request.end_time,
            slot_duration_minutes: request.slot_duration_minutes,
            max_patients_per_slot: request.max_patients_per_slot,
            total_slots,
            is_active: request.is_active,
            notes: request.notes,
            updated_at: Utc::now(),
            ..current
        };

        let stored = self.store.update_schedule(&updated).await?;
        info!("Updated schedule {} ({} slots)", stored.id, stored.total_slots);

        let doctor = self.store.get_doctor(stored.doctor_id).await?;
        Ok(ScheduleResponse::new(stored, doctor.as_ref()))
    }

    pub async fn get_schedule(&self, id: Uuid) -> ClinicResult<ScheduleResponse> {
        let schedule = self.find_schedule(id).await?;
        let doctor = self.store.get_doctor(schedule.doctor_id).await?;
        Ok(ScheduleResponse::new(schedule, doctor.as_ref()))
    }

    pub async fn list_schedules(
        &self,
        filter: &ScheduleFilter,
    ) -> ClinicResult<Vec<ScheduleResponse>> {
        let schedules = self.store.list_schedules(filter).await?;
        self.present(schedules).await
    }

    /// Active schedules of a doctor from today up to `days` ahead.
    pub async fn upcoming_schedules(
        &self,
        doctor_id: Uuid,
        days: Option<i64>,
    ) -> ClinicResult<Vec<ScheduleResponse>> {
        let days = days.unwrap_or(DEFAULT_UPCOMING_DAYS);
        if !(1..=MAX_UPCOMING_DAYS).contains(&days) {
            return Err(ClinicError::Validation(format!(
                "days must be between 1 and {}",
                MAX_UPCOMING_DAYS
            )));
        }

        let doctor = self
            .store
            .get_doctor(doctor_id)
            .await?
            .ok_or_else(|| {
                ClinicError::NotFound(format!("Doctor with ID {} not found", doctor_id))
            })?;

        let today = Utc::now().date_naive();
        let until = today + Duration::days(days);
        let schedules = self
            .store
            .schedules_between(doctor_id, today, until)
            .await?;

        Ok(schedules
            .into_iter()
            .map(|s| ScheduleResponse::new(s, Some(&doctor)))
            .collect())
    }

    /// Removes a schedule. Schedules that appointments point at are only
    /// deactivated.
    pub async fn delete_schedule(&self, id: Uuid) -> ClinicResult<DeleteScheduleResponse> {
        self.find_schedule(id).await?;

        let removal = self.store.remove_schedule(id).await?;
        info!("Removed schedule {}: {:?}", id, removal);

        Ok(DeleteScheduleResponse { id, removal })
    }

    async fn find_schedule(&self, id: Uuid) -> ClinicResult<Schedule> {
        self.store
            .get_schedule(id)
            .await?
            .ok_or_else(|| ClinicError::NotFound(format!("Schedule with ID {} not found", id)))
    }

    // Looks each doctor up once.
    async fn present(&self, schedules: Vec<Schedule>) -> ClinicResult<Vec<ScheduleResponse>> {
        let mut doctors: HashMap<Uuid, Option<Doctor>> = HashMap::new();
        let mut responses = Vec::with_capacity(schedules.len());

        for schedule in schedules {
            if !doctors.contains_key(&schedule.doctor_id) {
                let doctor = self.store.get_doctor(schedule.doctor_id).await?;
                if doctor.is_none() {
                    warn!(
                        "Schedule {} references missing doctor {}",
                        schedule.id, schedule.doctor_id
                    );
                }
                doctors.insert(schedule.doctor_id, doctor);
            }
            let doctor = doctors.get(&schedule.doctor_id).and_then(Option::as_ref);
            responses.push(ScheduleResponse::new(schedule, doctor));
        }

        debug!("Presented {} schedules", responses.len());
        Ok(responses)
    }
}

fn validated_total_slots(
    start_time: NaiveTime,
    end_time: NaiveTime,
    slot_duration_minutes: i32,
    max_patients_per_slot: i32,
    notes: Option<&str>,
) -> ClinicResult<i32> {
    slots::validate_slot_settings(slot_duration_minutes, max_patients_per_slot)?;
    validation::optional_text("notes", notes, 200)?;

    let total_slots = slots::compute_total_slots(start_time, end_time, slot_duration_minutes)?;
    if total_slots == 0 {
        return Err(ClinicError::Validation(
            "Time window must fit at least one slot".to_string(),
        ));
    }
    Ok(total_slots)
}

fn conflict_error(existing: &Schedule) -> ClinicError {
    ClinicError::Conflict(format!(
        "Schedule conflicts with existing schedule {} ({} - {})",
        existing.id, existing.start_time, existing.end_time
    ))
}
