use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{ClinicError, ClinicResult},
    models::doctor::{CreateDoctorRequest, Doctor, DoctorSearch, UpdateDoctorRequest},
    store::ClinicStore,
    validation,
};

#[derive(Clone)]
pub struct DoctorService {
    store: Arc<dyn ClinicStore>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn ClinicStore>) -> Self {
        Self { store }
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> ClinicResult<Doctor> {
        let now = Utc::now();
        let doctor = Doctor {
            id: Uuid::new_v4(),
            full_name: request.full_name.trim().to_string(),
            specialization: request.specialization.trim().to_string(),
            contact_number: request.contact_number.trim().to_string(),
            email: request.email.trim().to_string(),
            qualifications: request.qualifications,
            details: request.details,
            hospital_name: request.hospital_name,
            address: request.address,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        validate_doctor(&doctor)?;

        self.store.insert_doctor(&doctor).await?;
        info!("Created doctor {} ({})", doctor.id, doctor.full_name);

        Ok(doctor)
    }

    pub async fn get_doctor(&self, id: Uuid) -> ClinicResult<Doctor> {
        self.store
            .get_doctor(id)
            .await?
            .ok_or_else(|| ClinicError::NotFound(format!("Doctor with ID {} not found", id)))
    }

    pub async fn list_doctors(&self, include_inactive: bool) -> ClinicResult<Vec<Doctor>> {
        self.store.list_doctors(include_inactive).await
    }

    /// Active doctors whose name or specialization contains `q`, optionally
    /// narrowed to one specialization. With no criteria every active doctor
    /// is returned.
    pub async fn search_doctors(&self, search: DoctorSearch) -> ClinicResult<Vec<Doctor>> {
        let search = DoctorSearch {
            q: non_blank(search.q),
            specialization: non_blank(search.specialization),
        };
        validation::optional_text("q", search.q.as_deref(), 100)?;
        validation::optional_text("specialization", search.specialization.as_deref(), 100)?;

        self.store.search_doctors(&search).await
    }

    pub async fn doctors_by_specialization(
        &self,
        specialization: &str,
    ) -> ClinicResult<Vec<Doctor>> {
        validation::required_text("specialization", specialization, 100)?;
        self.search_doctors(DoctorSearch {
            q: None,
            specialization: Some(specialization.to_string()),
        })
        .await
    }

    pub async fn update_doctor(
        &self,
        id: Uuid,
        request: UpdateDoctorRequest,
    ) -> ClinicResult<Doctor> {
        let current = self.get_doctor(id).await?;

        let doctor = Doctor {
            full_name: request.full_name.unwrap_or(current.full_name),
            specialization: request.specialization.unwrap_or(current.specialization),
            contact_number: request.contact_number.unwrap_or(current.contact_number),
            email: request.email.unwrap_or(current.email),
            qualifications: request.qualifications.unwrap_or(current.qualifications),
            details: request.details.or(current.details),
            hospital_name: request.hospital_name.or(current.hospital_name),
            address: request.address.or(current.address),
            is_active: request.is_active.unwrap_or(current.is_active),
            updated_at: Utc::now(),
            ..current
        };
        validate_doctor(&doctor)?;

        self.store.update_doctor(&doctor).await?;
        Ok(doctor)
    }

    /// Doctors are never hard-deleted; their schedules and appointments keep
    /// pointing at them.
    pub async fn deactivate_doctor(&self, id: Uuid) -> ClinicResult<Doctor> {
        let current = self.get_doctor(id).await?;
        let doctor = Doctor {
            is_active: false,
            updated_at: Utc::now(),
            ..current
        };

        self.store.update_doctor(&doctor).await?;
        info!("Deactivated doctor {}", id);
        Ok(doctor)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_doctor(doctor: &Doctor) -> ClinicResult<()> {
    validation::required_text("full_name", &doctor.full_name, 100)?;
    validation::required_text("specialization", &doctor.specialization, 100)?;
    validation::required_text("contact_number", &doctor.contact_number, 15)?;
    validation::email("email", &doctor.email, 100)?;
    validation::required_text("qualifications", &doctor.qualifications, 500)?;
    validation::optional_text("details", doctor.details.as_deref(), 500)?;
    validation::optional_text("hospital_name", doctor.hospital_name.as_deref(), 100)?;
    validation::optional_text("address", doctor.address.as_deref(), 200)?;
    Ok(())
}
