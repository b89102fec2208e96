//! # ClinicSync Core
//!
//! Domain types and rules for doctor schedules and appointment booking.
//!
//! ## Layout
//!
//! - **Models**: doctors, schedules, appointments and payment transactions
//! - **Slots**: schedule arithmetic (total and available slot counts)
//! - **Conflict**: overlap detection between schedules of one doctor
//! - **Booking**: the per-schedule booking counter
//! - **Store**: the storage collaborator every service talks to
//! - **Services**: create/update/book flows that tie the rules together
//!
//! Nothing in this crate knows about HTTP or SQL. Storage is reached through
//! [`store::ClinicStore`], payments through [`payment::PaymentGateway`].

pub mod booking;
pub mod conflict;
pub mod errors;
pub mod models;
pub mod payment;
pub mod services;
pub mod slots;
pub mod store;
pub mod validation;
