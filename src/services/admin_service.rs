use crate::entities::{
    BookingStatus, BucketSize, RentalStatus, course_entity as courses,
    equipment_entity as equipment, equipment_rental_entity as rentals,
    system_setting_entity as settings, tee_time_entity as tee_times, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::range_service::bucket_price_key;
use crate::services::sum_cents;
use crate::utils::{cents_to_dollars, parse_dollars, require_text, today};
use chrono::{Datelike, Local, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct AdminService {
    pool: DatabaseConnection,
}

impl AdminService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_users(&self, params: &PaginationParams) -> AppResult<PaginatedResponse<UserResponse>> {
        let select = users::Entity::find();
        let total = select.clone().count(&self.pool).await?;
        let rows = select
            .order_by_asc(users::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(Into::into).collect(),
            params,
            total,
        ))
    }

    pub async fn get_user(&self, user_id: i32) -> AppResult<UserResponse> {
        Ok(self.find_user(user_id).await?.into())
    }

    async fn find_user(&self, user_id: i32) -> AppResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn update_user(
        &self,
        user_id: i32,
        request: AdminUpdateUserRequest,
    ) -> AppResult<UserResponse> {
        let mut user = self.find_user(user_id).await?.into_active_model();
        if let Some(v) = request.first_name {
            user.first_name = Set(require_text(&v, "First name")?);
        }
        if let Some(v) = request.last_name {
            user.last_name = Set(require_text(&v, "Last name")?);
        }
        if let Some(v) = request.phone {
            user.phone = Set(v.trim().to_string());
        }
        if let Some(v) = request.role {
            user.role = Set(v);
        }
        if let Some(v) = request.membership_type {
            user.membership_type = Set(require_text(&v, "Membership type")?);
        }
        if let Some(v) = request.membership_expiry {
            user.membership_expiry = Set(Some(v));
        }
        if let Some(v) = request.handicap {
            if !(-10.0..=54.0).contains(&v) {
                return Err(AppError::ValidationError(
                    "Handicap must be between -10 and 54".to_string(),
                ));
            }
            user.handicap = Set(Some(v));
        }
        if let Some(v) = request.is_active {
            user.is_active = Set(v);
        }
        if let Some(v) = request.email_verified {
            user.email_verified = Set(v);
        }
        user.updated_at = Set(Utc::now());
        let user = user.update(&self.pool).await?;

        log::info!("User {} updated by admin", user_id);
        Ok(user.into())
    }

    /// Removes the account and everything it owns. Admins cannot remove
    /// themselves.
    pub async fn delete_user(&self, user_id: i32, acting_admin: i32) -> AppResult<()> {
        if user_id == acting_admin {
            return Err(AppError::ValidationError(
                "You cannot delete your own account".to_string(),
            ));
        }
        let result = users::Entity::delete_by_id(user_id).exec(&self.pool).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        log::info!("User {} deleted by admin {}", user_id, acting_admin);
        Ok(())
    }

    pub async fn stats(&self) -> AppResult<AdminStats> {
        let today = today();
        let month_start = Local
            .with_ymd_and_hms(today.year(), today.month(), 1, 0, 0, 0)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
            .ok_or_else(|| AppError::InternalError("Cannot resolve month start".to_string()))?;

        let booked = || {
            tee_times::Entity::find()
                .filter(tee_times::Column::BookingStatus.ne(BookingStatus::Cancelled))
        };

        let total_revenue = sum_cents(&self.pool, booked(), tee_times::Column::TotalAmountCents)
            .await?
            + sum_cents(
                &self.pool,
                rentals::Entity::find(),
                rentals::Column::RentalPriceCents,
            )
            .await?;
        let monthly_revenue = sum_cents(
            &self.pool,
            booked().filter(tee_times::Column::CreatedAt.gte(month_start)),
            tee_times::Column::TotalAmountCents,
        )
        .await?
            + sum_cents(
                &self.pool,
                rentals::Entity::find().filter(rentals::Column::CreatedAt.gte(month_start)),
                rentals::Column::RentalPriceCents,
            )
            .await?;

        Ok(AdminStats {
            total_users: users::Entity::find().count(&self.pool).await?,
            total_courses: courses::Entity::find().count(&self.pool).await?,
            total_equipment: equipment::Entity::find().count(&self.pool).await?,
            total_bookings: tee_times::Entity::find().count(&self.pool).await?,
            total_rentals: rentals::Entity::find().count(&self.pool).await?,
            total_revenue: cents_to_dollars(total_revenue),
            monthly_revenue: cents_to_dollars(monthly_revenue),
            active_rentals: rentals::Entity::find()
                .filter(rentals::Column::RentalStatus.eq(RentalStatus::Rented))
                .count(&self.pool)
                .await?,
            upcoming_bookings: booked()
                .filter(tee_times::Column::BookingDate.gte(today))
                .count(&self.pool)
                .await?,
        })
    }

    pub async fn list_settings(&self) -> AppResult<Vec<SettingResponse>> {
        let rows = settings::Entity::find()
            .order_by_asc(settings::Column::SettingKey)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Creates or replaces a setting. Bucket price keys must hold a dollar
    /// amount.
    pub async fn upsert_setting(
        &self,
        key: &str,
        request: UpdateSettingRequest,
    ) -> AppResult<SettingResponse> {
        let key = require_text(key, "Setting key")?;
        let value = request.setting_value.trim().to_string();
        let is_price_key = BucketSize::ALL.iter().any(|size| bucket_price_key(*size) == key);
        if is_price_key && parse_dollars(&value).is_none() {
            return Err(AppError::ValidationError(format!(
                "{} must be a non-negative dollar amount",
                key
            )));
        }

        let now = Utc::now();
        let existing = settings::Entity::find()
            .filter(settings::Column::SettingKey.eq(key.as_str()))
            .one(&self.pool)
            .await?;

        let saved = match existing {
            Some(row) => {
                let mut active = row.into_active_model();
                active.setting_value = Set(value);
                if let Some(v) = request.description {
                    active.description = Set(v);
                }
                if let Some(v) = request.is_active {
                    active.is_active = Set(v);
                }
                active.updated_at = Set(now);
                active.update(&self.pool).await?
            }
            None => {
                settings::ActiveModel {
                    setting_key: Set(key.clone()),
                    setting_value: Set(value),
                    description: Set(request.description.unwrap_or_default()),
                    is_active: Set(request.is_active.unwrap_or(true)),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await
                .map_err(|e| AppError::conflict_on_unique(e, "Setting was created concurrently"))?
            }
        };

        log::info!("Setting {} = {}", key, saved.setting_value);
        Ok(saved.into())
    }
}
