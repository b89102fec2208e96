//! Payment capture.
//!
//! The clinic does not talk to a real payment provider; [`SimulatedGateway`]
//! accepts every payment and hands out a reference id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::{errors::ClinicResult, models::appointment::PaymentDetails};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Captures the payment and returns the provider's reference.
    async fn capture(&self, details: &PaymentDetails) -> ClinicResult<String>;

    /// Reverses a captured payment whose booking could not be written.
    async fn void(&self, payment_id: &str) -> ClinicResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway;

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn capture(&self, details: &PaymentDetails) -> ClinicResult<String> {
        let payment_id = payment_reference(Utc::now());
        info!(
            "Captured simulated payment {} ({} cents from {})",
            payment_id, details.amount_cents, details.bank_name
        );
        Ok(payment_id)
    }

    async fn void(&self, payment_id: &str) -> ClinicResult<()> {
        info!("Voided simulated payment {}", payment_id);
        Ok(())
    }
}

/// `PAY_<yyyyMMddHHmmss>_<8 hex chars>`
pub fn payment_reference(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("PAY_{}_{}", at.format("%Y%m%d%H%M%S"), &suffix[..8])
}
