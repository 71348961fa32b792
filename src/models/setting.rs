use crate::entities::system_setting_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettingResponse {
    #[schema(example = "small_bucket_price")]
    pub setting_key: String,
    #[schema(example = "8.00")]
    pub setting_value: String,
    pub description: String,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<system_setting_entity::Model> for SettingResponse {
    fn from(m: system_setting_entity::Model) -> Self {
        Self {
            setting_key: m.setting_key,
            setting_value: m.setting_value,
            description: m.description,
            is_active: m.is_active,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateSettingRequest {
    pub setting_value: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
