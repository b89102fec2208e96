use axum::http::StatusCode;
use clinicsync_core::models::schedule::{
    DeleteScheduleResponse, ScheduleRemoval, ScheduleResponse,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, booking_body, clinic_day, t};

#[test_log::test(tokio::test)]
async fn test_create_schedule_derives_slots() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;

    let response = ctx
        .server
        .post("/api/admin/schedules")
        .json(&json!({
            "doctor_id": doctor.id,
            "schedule_date": "2025-03-14",
            "start_time": "09:00:00",
            "end_time": "10:50:00",
            "slot_duration_minutes": 30,
            "notes": "Morning clinic",
        }))
        .await;

    response.assert_status_ok();
    let schedule = response.json::<ScheduleResponse>();
    assert_eq!(schedule.total_slots, 3);
    assert_eq!(schedule.booked_slots, 0);
    assert_eq!(schedule.available_slots, 3);
    assert_eq!(schedule.max_patients_per_slot, 1);
    assert_eq!(schedule.doctor_name, doctor.full_name);
    assert_eq!(schedule.schedule_date, clinic_day());
}

#[test_log::test(tokio::test)]
async fn test_overlapping_schedule_is_a_conflict() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    ctx.create_schedule(doctor.id, "10:00:00", "11:00:00").await;

    let response = ctx
        .server
        .post("/api/admin/schedules")
        .json(&json!({
            "doctor_id": doctor.id,
            "schedule_date": "2025-03-14",
            "start_time": "09:00:00",
            "end_time": "10:30:00",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Touching the existing window is fine
    let response = ctx
        .server
        .post("/api/admin/schedules")
        .json(&json!({
            "doctor_id": doctor.id,
            "schedule_date": "2025-03-14",
            "start_time": "09:00:00",
            "end_time": "10:00:00",
        }))
        .await;
    response.assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_create_schedule_validation() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;

    for body in [
        json!({ "doctor_id": doctor.id, "schedule_date": "2025-03-14",
                "start_time": "11:00:00", "end_time": "10:00:00" }),
        json!({ "doctor_id": doctor.id, "schedule_date": "2025-03-14",
                "start_time": "09:00:00", "end_time": "10:00:00",
                "slot_duration_minutes": 5 }),
        json!({ "doctor_id": doctor.id, "schedule_date": "2025-03-14",
                "start_time": "09:00:00", "end_time": "10:00:00",
                "max_patients_per_slot": 11 }),
    ] {
        let response = ctx.server.post("/api/admin/schedules").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    let response = ctx
        .server
        .post("/api/admin/schedules")
        .json(&json!({ "doctor_id": Uuid::new_v4(), "schedule_date": "2025-03-14",
                       "start_time": "09:00:00", "end_time": "10:00:00" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_update_below_booked_slots_is_rejected() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let schedule = ctx.create_schedule(doctor.id, "09:00:00", "11:00:00").await;
    for _ in 0..4 {
        ctx.server
            .post("/api/bookings")
            .json(&booking_body(schedule.id, Uuid::new_v4()))
            .await
            .assert_status_ok();
    }

    let response = ctx
        .server
        .put(&format!("/api/admin/schedules/{}", schedule.id))
        .json(&json!({
            "schedule_date": "2025-03-14",
            "start_time": "09:00:00",
            "end_time": "10:30:00",
            "slot_duration_minutes": 30,
            "max_patients_per_slot": 1,
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<Value>();
    assert!(
        error["error"]
            .as_str()
            .unwrap()
            .contains("cannot be less than already booked slots")
    );

    let stored = ctx
        .server
        .get(&format!("/api/schedules/{}", schedule.id))
        .await
        .json::<ScheduleResponse>();
    assert_eq!(stored.total_slots, 4);
    assert_eq!(stored.end_time, t(11, 0));
}

#[test_log::test(tokio::test)]
async fn test_update_can_extend_own_window() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let schedule = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;

    let updated = ctx
        .server
        .put(&format!("/api/admin/schedules/{}", schedule.id))
        .json(&json!({
            "schedule_date": "2025-03-14",
            "start_time": "08:30:00",
            "end_time": "10:30:00",
            "slot_duration_minutes": 20,
            "max_patients_per_slot": 2,
            "notes": "Extended",
        }))
        .await
        .json::<ScheduleResponse>();

    assert_eq!(updated.total_slots, 6);
    assert_eq!(updated.start_time, t(8, 30));
    assert_eq!(updated.notes.as_deref(), Some("Extended"));
    assert!(updated.is_active);
}

#[test_log::test(tokio::test)]
async fn test_list_and_delete_schedules() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let unused = ctx.create_schedule(doctor.id, "13:00:00", "14:00:00").await;
    let booked = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;
    ctx.server
        .post("/api/bookings")
        .json(&booking_body(booked.id, Uuid::new_v4()))
        .await
        .assert_status_ok();

    let listed = ctx
        .server
        .get("/api/schedules")
        .add_query_param("doctor_id", doctor.id)
        .add_query_param("date", "2025-03-14")
        .await
        .json::<Vec<ScheduleResponse>>();
    let ids: Vec<Uuid> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![booked.id, unused.id]);

    let removed = ctx
        .server
        .delete(&format!("/api/admin/schedules/{}", unused.id))
        .await
        .json::<DeleteScheduleResponse>();
    assert_eq!(removed.removal, ScheduleRemoval::Deleted);
    ctx.server
        .get(&format!("/api/schedules/{}", unused.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let removed = ctx
        .server
        .delete(&format!("/api/admin/schedules/{}", booked.id))
        .await
        .json::<DeleteScheduleResponse>();
    assert_eq!(removed.removal, ScheduleRemoval::Deactivated);

    let active = ctx
        .server
        .get("/api/schedules")
        .add_query_param("active_only", true)
        .await
        .json::<Vec<ScheduleResponse>>();
    assert!(active.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_upcoming_schedules_window() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let tomorrow = chrono::Utc::now().date_naive() + chrono::Duration::days(1);
    let far = chrono::Utc::now().date_naive() + chrono::Duration::days(60);

    for date in [tomorrow, far] {
        ctx.server
            .post("/api/admin/schedules")
            .json(&json!({
                "doctor_id": doctor.id,
                "schedule_date": date,
                "start_time": "09:00:00",
                "end_time": "10:00:00",
            }))
            .await
            .assert_status_ok();
    }

    let upcoming = ctx
        .server
        .get(&format!("/api/doctors/{}/schedules/upcoming", doctor.id))
        .await
        .json::<Vec<ScheduleResponse>>();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].schedule_date, tomorrow);

    let upcoming = ctx
        .server
        .get(&format!("/api/doctors/{}/schedules/upcoming", doctor.id))
        .add_query_param("days", 90)
        .await
        .json::<Vec<ScheduleResponse>>();
    assert_eq!(upcoming.len(), 2);

    ctx.server
        .get(&format!("/api/doctors/{}/schedules/upcoming", doctor.id))
        .add_query_param("days", 0)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
