use crate::entities::{
    ConditionStatus, PaymentStatus, RentalStatus, equipment_entity, equipment_rental_entity,
    user_entity,
};
use crate::models::UserSummary;
use crate::utils::cents_to_dollars;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    #[param(example = "clubs")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentResponse {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub rental_price_per_day: f64,
    pub quantity_available: i32,
    pub condition_status: ConditionStatus,
    pub image_url: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<equipment_entity::Model> for EquipmentResponse {
    fn from(m: equipment_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            category: m.category,
            description: m.description,
            rental_price_per_day: cents_to_dollars(m.rental_price_per_day_cents),
            quantity_available: m.quantity_available,
            condition_status: m.condition_status,
            image_url: m.image_url,
            is_available: m.is_available,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEquipmentRequest {
    #[schema(example = "Premium Driver")]
    pub name: String,
    #[schema(example = "clubs")]
    pub category: String,
    pub description: Option<String>,
    #[schema(example = 15.0)]
    pub rental_price_per_day: f64,
    pub quantity_available: i32,
    pub condition_status: Option<ConditionStatus>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEquipmentRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub rental_price_per_day: Option<f64>,
    pub quantity_available: Option<i32>,
    pub condition_status: Option<ConditionStatus>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EquipmentStatusRequest {
    pub condition_status: Option<ConditionStatus>,
    pub quantity_available: Option<i32>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRentalRequest {
    pub equipment_id: i32,
    #[schema(example = "2025-07-04")]
    pub rental_date: String,
    #[schema(example = "2025-07-06")]
    pub due_date: String,
    /// Defaults to 1.
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RentalResponse {
    pub id: i32,
    pub user_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    pub equipment_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<EquipmentResponse>,
    pub rental_date: NaiveDate,
    pub due_date: NaiveDate,
    pub returned_at: Option<DateTime<Utc>>,
    pub quantity: i32,
    pub rental_price: f64,
    pub deposit_amount: f64,
    pub payment_status: PaymentStatus,
    pub rental_status: RentalStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl RentalResponse {
    pub fn with_equipment(mut self, equipment: Option<equipment_entity::Model>) -> Self {
        self.equipment = equipment.map(Into::into);
        self
    }

    pub fn with_user(mut self, user: Option<user_entity::Model>) -> Self {
        self.user = user.map(Into::into);
        self
    }
}

impl From<equipment_rental_entity::Model> for RentalResponse {
    fn from(m: equipment_rental_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            user: None,
            equipment_id: m.equipment_id,
            equipment: None,
            rental_date: m.rental_date,
            due_date: m.due_date,
            returned_at: m.returned_at,
            quantity: m.quantity,
            rental_price: cents_to_dollars(m.rental_price_cents),
            deposit_amount: cents_to_dollars(m.deposit_amount_cents),
            payment_status: m.payment_status,
            rental_status: m.rental_status,
            notes: m.notes,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RentalListQuery {
    pub status: Option<RentalStatus>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}
