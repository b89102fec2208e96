//! The per-schedule booking counter.
//!
//! `booked_slots` may only move through these methods. Stores apply them
//! while holding whatever lock or transaction makes the read and the write
//! one unit.
//!
//! The counter says how many slots are taken, not which ones. Slot numbers
//! come from [`first_free_slot`] over the appointments still booked, so a
//! number freed by a cancellation is handed out again before a new one.

use crate::{
    errors::{ClinicError, ClinicResult},
    models::schedule::Schedule,
};

impl Schedule {
    pub fn has_capacity(&self) -> bool {
        self.booked_slots < self.total_slots
    }

    /// Takes one slot. The schedule is left untouched when it is already
    /// full.
    pub fn reserve_slot(&mut self) -> ClinicResult<()> {
        if !self.has_capacity() {
            return Err(ClinicError::CapacityExceeded(format!(
                "Schedule {} has no available slots",
                self.id
            )));
        }
        self.booked_slots += 1;
        Ok(())
    }

    /// Gives one slot back. Stays at zero if nothing is booked.
    pub fn release_slot(&mut self) {
        self.booked_slots = (self.booked_slots - 1).max(0);
    }
}

/// Lowest 1-based slot number not in `taken`.
pub fn first_free_slot(taken: impl IntoIterator<Item = i32>) -> i32 {
    let mut taken: Vec<i32> = taken.into_iter().filter(|n| *n > 0).collect();
    taken.sort_unstable();
    taken.dedup();

    let mut candidate = 1;
    for n in taken {
        if n != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}
