use axum::http::StatusCode;
use clinicsync_core::models::doctor::Doctor;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, doctor_body};

#[test_log::test(tokio::test)]
async fn test_create_and_get_doctor() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/admin/doctors")
        .json(&doctor_body())
        .await;
    response.assert_status_ok();
    let created = response.json::<Doctor>();
    assert!(created.is_active);
    assert_eq!(created.specialization, "Dermatology");

    let fetched = ctx
        .server
        .get(&format!("/api/doctors/{}", created.id))
        .await
        .json::<Doctor>();
    assert_eq!(fetched, created);
}

#[test_log::test(tokio::test)]
async fn test_create_doctor_rejects_bad_email() {
    let ctx = TestContext::new();
    let mut body = doctor_body();
    body["email"] = json!("not-an-email");

    let response = ctx.server.post("/api/admin/doctors").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error = response.json::<Value>();
    assert!(error["error"].as_str().unwrap().contains("email"));
}

#[test_log::test(tokio::test)]
async fn test_update_and_deactivate_doctor() {
    let ctx = TestContext::new();
    let doctor = ctx.create_doctor().await;

    let updated = ctx
        .server
        .put(&format!("/api/admin/doctors/{}", doctor.id))
        .json(&json!({ "hospital_name": "Harbour Clinic" }))
        .await
        .json::<Doctor>();
    assert_eq!(updated.hospital_name.as_deref(), Some("Harbour Clinic"));
    assert_eq!(updated.full_name, doctor.full_name);

    let deactivated = ctx
        .server
        .delete(&format!("/api/admin/doctors/{}", doctor.id))
        .await
        .json::<Doctor>();
    assert!(!deactivated.is_active);

    let active = ctx
        .server
        .get("/api/admin/doctors")
        .await
        .json::<Vec<Doctor>>();
    assert!(active.is_empty());

    let all = ctx
        .server
        .get("/api/admin/doctors")
        .add_query_param("include_inactive", true)
        .await
        .json::<Vec<Doctor>>();
    assert_eq!(all.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_unknown_doctor_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/doctors/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_search_doctors_by_name_and_specialization() {
    let ctx = TestContext::new();
    let mut cardiologist = doctor_body();
    cardiologist["full_name"] = json!("Amara Perera");
    cardiologist["specialization"] = json!("Cardiology");
    let amara = ctx
        .server
        .post("/api/admin/doctors")
        .json(&cardiologist)
        .await
        .json::<Doctor>();
    let mut retired = doctor_body();
    retired["full_name"] = json!("Nimal Perera");
    retired["specialization"] = json!("Cardiology");
    let nimal = ctx
        .server
        .post("/api/admin/doctors")
        .json(&retired)
        .await
        .json::<Doctor>();
    ctx.server
        .delete(&format!("/api/admin/doctors/{}", nimal.id))
        .await
        .assert_status_ok();
    ctx.create_doctor().await;

    let by_name = ctx
        .server
        .get("/api/doctors/search")
        .add_query_param("q", "perera")
        .await
        .json::<Vec<Doctor>>();
    assert_eq!(by_name, vec![amara.clone()]);

    let by_fragment = ctx
        .server
        .get("/api/doctors/search")
        .add_query_param("q", "CARDIO")
        .await
        .json::<Vec<Doctor>>();
    assert_eq!(by_fragment, vec![amara.clone()]);

    let by_specialization = ctx
        .server
        .get("/api/doctors/specialization/cardiology")
        .await
        .json::<Vec<Doctor>>();
    assert_eq!(by_specialization, vec![amara]);

    let everyone = ctx
        .server
        .get("/api/doctors/search")
        .add_query_param("q", "  ")
        .await
        .json::<Vec<Doctor>>();
    assert_eq!(everyone.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_unknown_specialization_is_empty() {
    let ctx = TestContext::new();
    ctx.create_doctor().await;

    let doctors = ctx
        .server
        .get("/api/doctors/specialization/Neurology")
        .await
        .json::<Vec<Doctor>>();

    assert!(doctors.is_empty());
}
