//! Schedule arithmetic.
//!
//! A schedule's capacity is the number of whole slots that fit in its time
//! window. Partial slots at the end of the window are discarded.

use chrono::NaiveTime;

use crate::errors::{ClinicError, ClinicResult};

pub const MIN_SLOT_DURATION_MINUTES: i32 = 15;
pub const MAX_SLOT_DURATION_MINUTES: i32 = 120;
pub const MIN_PATIENTS_PER_SLOT: i32 = 1;
pub const MAX_PATIENTS_PER_SLOT: i32 = 10;

/// Number of whole slots of `slot_duration_minutes` between `start_time`
/// and `end_time`.
///
/// # Errors
///
/// * `ClinicError::Validation` - the duration is not positive or the window
///   is empty or inverted
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use clinicsync_core::slots::compute_total_slots;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
/// assert_eq!(compute_total_slots(start, end, 30).unwrap(), 4);
/// ```
pub fn compute_total_slots(
    start_time: NaiveTime,
    end_time: NaiveTime,
    slot_duration_minutes: i32,
) -> ClinicResult<i32> {
    if slot_duration_minutes <= 0 {
        return Err(ClinicError::Validation(
            "Slot duration must be greater than zero".to_string(),
        ));
    }
    if end_time <= start_time {
        return Err(ClinicError::Validation(
            "End time must be after start time".to_string(),
        ));
    }

    let window_minutes = (end_time - start_time).num_minutes();
    let slots = window_minutes / i64::from(slot_duration_minutes);

    // A window is shorter than one day, so this always fits.
    i32::try_from(slots)
        .map_err(|_| ClinicError::Validation("Time window is too large".to_string()))
}

/// Slots still free on a schedule. Never negative, even if the counters are
/// out of step.
pub fn compute_available_slots(total_slots: i32, booked_slots: i32) -> i32 {
    total_slots.saturating_sub(booked_slots).max(0)
}

/// Checks the per-slot settings accepted on create and update.
pub fn validate_slot_settings(
    slot_duration_minutes: i32,
    max_patients_per_slot: i32,
) -> ClinicResult<()> {
    if !(MIN_SLOT_DURATION_MINUTES..=MAX_SLOT_DURATION_MINUTES).contains(&slot_duration_minutes) {
        return Err(ClinicError::Validation(format!(
            "Slot duration must be between {} and {} minutes",
            MIN_SLOT_DURATION_MINUTES, MAX_SLOT_DURATION_MINUTES
        )));
    }
    if !(MIN_PATIENTS_PER_SLOT..=MAX_PATIENTS_PER_SLOT).contains(&max_patients_per_slot) {
        return Err(ClinicError::Validation(format!(
            "Max patients per slot must be between {} and {}",
            MIN_PATIENTS_PER_SLOT, MAX_PATIENTS_PER_SLOT
        )));
    }
    Ok(())
}
