use axum::http::StatusCode;
use clinicsync_api::middleware::error_handling::{AppError, map_error};
use clinicsync_core::errors::ClinicError;
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case(ClinicError::NotFound("Schedule missing".into()), StatusCode::NOT_FOUND)]
#[case(ClinicError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(ClinicError::Conflict("Overlap".into()), StatusCode::CONFLICT)]
#[case(ClinicError::CapacityExceeded("Full".into()), StatusCode::CONFLICT)]
#[case(ClinicError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    ClinicError::Internal(std::io::Error::other("Internal error").into()),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(ClinicError::CapacityExceeded(
        "Schedule has no available slots".to_string(),
    ));
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body["error"],
        "Capacity exceeded: Schedule has no available slots"
    );
}

#[test]
fn test_eyre_report_becomes_database_error() {
    let err: AppError = eyre::eyre!("connection reset").into();
    assert!(matches!(err.0, ClinicError::Database(_)));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
