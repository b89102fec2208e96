use clinicsync_core::models::{
    admin::{DashboardStats, TransactionSummary},
    appointment::{BookingResponse, TransactionStatus},
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{TestContext, booking_body};

async fn book(ctx: &TestContext, schedule_id: Uuid) -> BookingResponse {
    ctx.server
        .post("/api/bookings")
        .json(&booking_body(schedule_id, Uuid::new_v4()))
        .await
        .json::<BookingResponse>()
}

#[test_log::test(tokio::test)]
async fn test_transactions_list_newest_first_with_names() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    let schedule = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;
    let first = book(&ctx, schedule.id).await;
    let second = book(&ctx, schedule.id).await;

    let transactions = ctx
        .server
        .get("/api/admin/transactions")
        .await
        .json::<Vec<TransactionSummary>>();

    assert_eq!(transactions.len(), 2);
    assert!(transactions[0].payment_date >= transactions[1].payment_date);
    let mut ids: Vec<Uuid> = transactions.iter().map(|t| t.transaction_id).collect();
    ids.sort();
    let mut expected = vec![first.transaction_id, second.transaction_id];
    expected.sort();
    assert_eq!(ids, expected);
    for transaction in &transactions {
        assert_eq!(transaction.doctor_name, doctor.full_name);
        assert_eq!(transaction.status, TransactionStatus::Completed);
        assert_eq!(transaction.amount_cents, 300000);
    }
}

#[test_log::test(tokio::test)]
async fn test_empty_clinic_has_zero_stats() {
    let ctx = TestContext::new();

    let stats = ctx
        .server
        .get("/api/admin/dashboard/stats")
        .await
        .json::<DashboardStats>();

    assert_eq!(stats, DashboardStats::default());
}

#[test_log::test(tokio::test)]
async fn test_dashboard_stats_count_slots_and_appointments() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;
    ctx.create_doctor().await;
    let morning = ctx.create_schedule(doctor.id, "09:00:00", "10:00:00").await;
    let evening = ctx.create_schedule(doctor.id, "17:00:00", "19:00:00").await;

    let kept = book(&ctx, morning.id).await;
    let cancelled = book(&ctx, evening.id).await;
    ctx.server
        .post(&format!("/api/bookings/{}/cancel", cancelled.appointment_id))
        .await
        .assert_status_ok();

    let stats = ctx
        .server
        .get("/api/admin/dashboard/stats")
        .await
        .json::<DashboardStats>();

    assert_eq!(
        stats,
        DashboardStats {
            total_doctors: 2,
            active_doctors: 2,
            total_schedules: 2,
            active_schedules: 2,
            total_slots: 6,
            booked_slots: 1,
            total_appointments: 2,
            booked_appointments: 1,
            // The fixed clinic day is in the past.
            today_appointments: 0,
        }
    );
    assert_eq!(kept.slot_number, 1);
}
