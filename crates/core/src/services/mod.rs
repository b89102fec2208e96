//! Request flows built on the domain rules and the store.
//!
//! Every check a flow performs runs before its first write.

pub mod admin;
pub mod booking;
pub mod doctor;
pub mod schedule;

pub use admin::AdminService;
pub use booking::BookingService;
pub use doctor::DoctorService;
pub use schedule::ScheduleService;
