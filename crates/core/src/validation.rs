//! Field checks shared by the services.

use crate::errors::{ClinicError, ClinicResult};

pub fn required_text(field: &str, value: &str, max_len: usize) -> ClinicResult<()> {
    if value.trim().is_empty() {
        return Err(ClinicError::Validation(format!("{} is required", field)));
    }
    optional_text(field, Some(value), max_len)
}

pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> ClinicResult<()> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(ClinicError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        ))),
        _ => Ok(()),
    }
}

/// Loose shape check: something before and after a single `@`, and a dot in
/// the domain part.
pub fn email(field: &str, value: &str, max_len: usize) -> ClinicResult<()> {
    required_text(field, value, max_len)?;

    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ClinicError::Validation(format!(
            "{} must be a valid email address",
            field
        )))
    }
}
