use crate::entities::{ReferenceType, TransactionStatus, payment_entity};
use crate::utils::cents_to_dollars;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub reference_type: ReferenceType,
    pub reference_id: i32,
    /// Defaults to `credit_card`.
    #[schema(example = "credit_card")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i32,
    pub user_id: i32,
    pub reference_type: ReferenceType,
    pub reference_id: i32,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    pub payment_status: TransactionStatus,
    pub failure_reason: String,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<payment_entity::Model> for PaymentResponse {
    fn from(m: payment_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            reference_type: m.reference_type,
            reference_id: m.reference_id,
            amount: cents_to_dollars(m.amount_cents),
            currency: m.currency,
            payment_method: m.payment_method,
            payment_status: m.payment_status,
            failure_reason: m.failure_reason,
            processed_at: m.processed_at,
            created_at: m.created_at,
        }
    }
}
