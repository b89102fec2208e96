use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub full_name: String,
    pub specialization: String,
    pub contact_number: String,
    pub email: String,
    pub qualifications: String,
    pub details: Option<String>,
    pub hospital_name: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub full_name: String,
    pub specialization: String,
    pub contact_number: String,
    pub email: String,
    pub qualifications: String,
    pub details: Option<String>,
    pub hospital_name: Option<String>,
    pub address: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub full_name: Option<String>,
    pub specialization: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub qualifications: Option<String>,
    pub details: Option<String>,
    pub hospital_name: Option<String>,
    pub address: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDoctorsQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// Directory search over active doctors. `q` matches part of the name or the
/// specialization; `specialization` must match in full. Both ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSearch {
    pub q: Option<String>,
    pub specialization: Option<String>,
}
