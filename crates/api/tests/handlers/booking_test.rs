use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use clinicsync_core::{
    errors::{ClinicError, ClinicResult},
    models::{
        appointment::{
            AppointmentStatus, BookingResponse, CancelAppointmentResponse, PatientAppointment,
            PaymentDetails, TransactionStatus,
        },
        schedule::ScheduleResponse,
    },
    payment::PaymentGateway,
    store::ClinicStore,
};
use mockall::mock;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{TestContext, booking_body, t};

mock! {
    pub Payments {}

    #[async_trait]
    impl PaymentGateway for Payments {
        async fn capture(&self, details: &PaymentDetails) -> ClinicResult<String>;
        async fn void(&self, payment_id: &str) -> ClinicResult<()>;
    }
}

#[test_log::test(tokio::test)]
async fn test_book_until_full() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let schedule = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;
    assert_eq!(schedule.total_slots, 2);

    for slot in 1..=2 {
        let response = ctx
            .server
            .post("/api/bookings")
            .json(&booking_body(schedule.id, Uuid::new_v4()))
            .await;
        response.assert_status_ok();
        let booking = response.json::<BookingResponse>();
        assert_eq!(booking.slot_number, slot);
        assert_eq!(booking.status, TransactionStatus::Completed);
        assert_eq!(booking.appointment_status, AppointmentStatus::Booked);
        assert_eq!(booking.amount_cents, 300000);
    }

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&booking_body(schedule.id, Uuid::new_v4()))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let stored = ctx
        .server
        .get(&format!("/api/schedules/{}", schedule.id))
        .await
        .json::<ScheduleResponse>();
    assert_eq!(stored.booked_slots, 2);
    assert_eq!(stored.available_slots, 0);
}

#[test_log::test(tokio::test)]
async fn test_booking_unknown_schedule() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&booking_body(Uuid::new_v4(), Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_booking_validation() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let schedule = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;

    let mut body = booking_body(schedule.id, Uuid::new_v4());
    body["payment"]["amount_cents"] = serde_json::json!(0);
    ctx.server
        .post("/api/bookings")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let mut body = booking_body(schedule.id, Uuid::new_v4());
    body["nic"] = serde_json::json!("1990123456789");
    ctx.server
        .post("/api/bookings")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_cancel_and_history() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let schedule = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;
    let patient_id = Uuid::new_v4();

    let booking = ctx
        .server
        .post("/api/bookings")
        .json(&booking_body(schedule.id, patient_id))
        .await
        .json::<BookingResponse>();

    let fetched = ctx
        .server
        .get(&format!("/api/bookings/{}", booking.appointment_id))
        .await
        .json::<BookingResponse>();
    assert_eq!(fetched.payment_id, booking.payment_id);

    let cancelled = ctx
        .server
        .post(&format!("/api/bookings/{}/cancel", booking.appointment_id))
        .await
        .json::<CancelAppointmentResponse>();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(cancelled.schedule_id, schedule.id);

    let stored = ctx.store.get_schedule(schedule.id).await.unwrap().unwrap();
    assert_eq!(stored.booked_slots, 0);

    ctx.server
        .post(&format!("/api/bookings/{}/cancel", booking.appointment_id))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let history = ctx
        .server
        .get(&format!("/api/patients/{}/appointments", patient_id))
        .await
        .json::<Vec<PatientAppointment>>();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, AppointmentStatus::Cancelled);
    assert_eq!(history[0].doctor_name, doctor.full_name);
    assert_eq!(history[0].start_time, Some(t(9, 0)));
}

#[test_log::test(tokio::test)]
async fn test_failed_payment_books_nothing() {
    let mut payments = MockPayments::new();
    payments.expect_capture().times(1).returning(|_| {
        Err(ClinicError::Internal(
            std::io::Error::other("gateway unreachable").into(),
        ))
    });
    payments.expect_void().never();

    let ctx = TestContext::with_payments(Arc::new(payments));
    let doctor = ctx.create_doctor().await;
    let schedule = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;

    ctx.server
        .post("/api/bookings")
        .json(&booking_body(schedule.id, Uuid::new_v4()))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let stored = ctx.store.get_schedule(schedule.id).await.unwrap().unwrap();
    assert_eq!(stored.booked_slots, 0);
}
