pub mod admin;
pub mod booking;
pub mod doctor;
pub mod schedule;
