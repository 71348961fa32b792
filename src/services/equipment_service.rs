use crate::entities::{
    ConditionStatus, PaymentStatus, RentalStatus, equipment_entity as equipment,
    equipment_rental_entity as rentals, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{dollars_to_cents, parse_date, require_text, today};
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

const DEPOSIT_PERCENT: i64 = 20;
pub const MAX_RENTAL_DAYS: i64 = 90;

/// Rental length in days, counting both the start and the due date.
pub fn rental_days(rental_date: NaiveDate, due_date: NaiveDate) -> i64 {
    (due_date - rental_date).num_days() + 1
}

pub fn rental_price(price_per_day_cents: i64, quantity: i32, days: i64) -> AppResult<i64> {
    price_per_day_cents
        .checked_mul(i64::from(quantity))
        .and_then(|p| p.checked_mul(days))
        .filter(|p| *p <= i64::MAX / DEPOSIT_PERCENT)
        .ok_or_else(|| AppError::ValidationError("Rental price is too large".to_string()))
}

/// 20% of the rental price, rounded to the nearest cent.
pub fn deposit(price_cents: i64) -> i64 {
    (price_cents * DEPOSIT_PERCENT + 50) / 100
}

#[derive(Clone)]
pub struct EquipmentService {
    pool: DatabaseConnection,
}

impl EquipmentService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Rentable equipment, optionally narrowed to one category.
    pub async fn list(&self, category: Option<&str>) -> AppResult<Vec<EquipmentResponse>> {
        let mut select = equipment::Entity::find()
            .filter(equipment::Column::IsAvailable.eq(true))
            .filter(equipment::Column::QuantityAvailable.gt(0));
        if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
            select = select.filter(equipment::Column::Category.eq(category));
        }

        let rows = select
            .order_by_asc(equipment::Column::Category)
            .order_by_asc(equipment::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, equipment_id: i32) -> AppResult<EquipmentResponse> {
        Ok(self.find(equipment_id).await?.into())
    }

    async fn find(&self, equipment_id: i32) -> AppResult<equipment::Model> {
        equipment::Entity::find_by_id(equipment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))
    }

    pub async fn rent(&self, user_id: i32, request: CreateRentalRequest) -> AppResult<RentalResponse> {
        let rental_date = parse_date(&request.rental_date)?;
        let due_date = parse_date(&request.due_date)?;
        let quantity = request.quantity.unwrap_or(1);

        if rental_date < today() {
            return Err(AppError::ValidationError(
                "Rental date cannot be in the past".to_string(),
            ));
        }
        if due_date < rental_date {
            return Err(AppError::ValidationError(
                "Due date cannot be before the rental date".to_string(),
            ));
        }
        if rental_days(rental_date, due_date) > MAX_RENTAL_DAYS {
            return Err(AppError::ValidationError(format!(
                "Rentals cannot run longer than {} days",
                MAX_RENTAL_DAYS
            )));
        }
        if quantity < 1 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let item = equipment::Entity::find_by_id(request.equipment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))?;
        if !item.is_available || item.condition_status == ConditionStatus::Maintenance {
            return Err(AppError::ValidationError(
                "Equipment is not available for rental".to_string(),
            ));
        }

        let price = rental_price(
            item.rental_price_per_day_cents,
            quantity,
            rental_days(rental_date, due_date),
        )?;

        let now = Utc::now();
        // Conditional decrement; a concurrent rental that drained the stock
        // leaves this matching no row.
        let reserved = equipment::Entity::update_many()
            .col_expr(
                equipment::Column::QuantityAvailable,
                Expr::col(equipment::Column::QuantityAvailable).sub(quantity),
            )
            .col_expr(equipment::Column::UpdatedAt, Expr::value(now))
            .filter(equipment::Column::Id.eq(item.id))
            .filter(equipment::Column::QuantityAvailable.gte(quantity))
            .exec(&txn)
            .await?;
        if reserved.rows_affected == 0 {
            return Err(AppError::ValidationError(
                "Insufficient quantity available".to_string(),
            ));
        }

        let rental = rentals::ActiveModel {
            user_id: Set(user_id),
            equipment_id: Set(item.id),
            rental_date: Set(rental_date),
            due_date: Set(due_date),
            returned_at: Set(None),
            quantity: Set(quantity),
            rental_price_cents: Set(price),
            deposit_amount_cents: Set(deposit(price)),
            payment_status: Set(PaymentStatus::Pending),
            rental_status: Set(RentalStatus::Rented),
            notes: Set(request.notes.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Rental {} created: {} x equipment {} for user {}",
            rental.id,
            quantity,
            item.id,
            user_id
        );

        let item = equipment::Model {
            quantity_available: item.quantity_available - quantity,
            ..item
        };
        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        Ok(RentalResponse::from(rental)
            .with_equipment(Some(item))
            .with_user(user))
    }

    /// Marks a rental returned and puts its quantity back on the shelf.
    /// With `owner` set, rentals of other users are reported as missing.
    pub async fn return_rental(
        &self,
        rental_id: i32,
        owner: Option<i32>,
    ) -> AppResult<RentalResponse> {
        let txn = self.pool.begin().await?;

        let rental = rentals::Entity::find_by_id(rental_id)
            .one(&txn)
            .await?
            .filter(|r| owner.is_none_or(|user_id| r.user_id == user_id))
            .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;

        let now = Utc::now();
        let closed = rentals::Entity::update_many()
            .col_expr(rentals::Column::RentalStatus, Expr::value(RentalStatus::Returned))
            .col_expr(rentals::Column::ReturnedAt, Expr::value(now))
            .col_expr(rentals::Column::UpdatedAt, Expr::value(now))
            .filter(rentals::Column::Id.eq(rental.id))
            .filter(rentals::Column::RentalStatus.eq(RentalStatus::Rented))
            .exec(&txn)
            .await?;
        if closed.rows_affected == 0 {
            return Err(AppError::ValidationError(
                "Equipment already returned".to_string(),
            ));
        }

        equipment::Entity::update_many()
            .col_expr(
                equipment::Column::QuantityAvailable,
                Expr::col(equipment::Column::QuantityAvailable).add(rental.quantity),
            )
            .col_expr(equipment::Column::UpdatedAt, Expr::value(now))
            .filter(equipment::Column::Id.eq(rental.equipment_id))
            .exec(&txn)
            .await?;

        let returned = rentals::Entity::find_by_id(rental.id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::InternalError("Rental vanished after return".to_string()))?;
        txn.commit().await?;

        log::info!(
            "Rental {} returned, {} x equipment {} restocked",
            rental.id,
            rental.quantity,
            rental.equipment_id
        );
        self.with_details(vec![returned])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("Rental vanished after return".to_string()))
    }

    pub async fn list_rentals_for_user(&self, user_id: i32) -> AppResult<Vec<RentalResponse>> {
        let rows = rentals::Entity::find()
            .filter(rentals::Column::UserId.eq(user_id))
            .order_by_desc(rentals::Column::RentalDate)
            .order_by_desc(rentals::Column::Id)
            .all(&self.pool)
            .await?;
        self.with_details(rows).await
    }

    /// Rentals still out, earliest due first.
    pub async fn active_rentals(&self) -> AppResult<Vec<RentalResponse>> {
        let rows = rentals::Entity::find()
            .filter(rentals::Column::RentalStatus.eq(RentalStatus::Rented))
            .order_by_asc(rentals::Column::DueDate)
            .all(&self.pool)
            .await?;
        self.with_details(rows).await
    }

    pub async fn list_rentals(
        &self,
        query: &RentalListQuery,
    ) -> AppResult<PaginatedResponse<RentalResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);
        let mut select = rentals::Entity::find();
        if let Some(status) = query.status {
            select = select.filter(rentals::Column::RentalStatus.eq(status));
        }

        let total = select.clone().count(&self.pool).await?;
        let rows = select
            .order_by_desc(rentals::Column::CreatedAt)
            .order_by_desc(rentals::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            self.with_details(rows).await?,
            &params,
            total,
        ))
    }

    async fn with_details(&self, rows: Vec<rentals::Model>) -> AppResult<Vec<RentalResponse>> {
        let equipment_ids: HashSet<i32> = rows.iter().map(|r| r.equipment_id).collect();
        let user_ids: HashSet<i32> = rows.iter().map(|r| r.user_id).collect();

        let equipment_map: HashMap<i32, equipment::Model> = equipment::Entity::find()
            .filter(equipment::Column::Id.is_in(equipment_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();
        let user_map: HashMap<i32, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let item = equipment_map.get(&row.equipment_id).cloned();
                let user = user_map.get(&row.user_id).cloned();
                RentalResponse::from(row).with_equipment(item).with_user(user)
            })
            .collect())
    }

    pub async fn create_equipment(
        &self,
        request: CreateEquipmentRequest,
    ) -> AppResult<EquipmentResponse> {
        let name = require_text(&request.name, "Equipment name")?;
        let category = require_text(&request.category, "Category")?;
        validate_quantity(request.quantity_available)?;

        let now = Utc::now();
        let item = equipment::ActiveModel {
            name: Set(name),
            category: Set(category),
            description: Set(request.description.unwrap_or_default()),
            rental_price_per_day_cents: Set(dollars_to_cents(request.rental_price_per_day)?),
            quantity_available: Set(request.quantity_available),
            condition_status: Set(request.condition_status.unwrap_or(ConditionStatus::Good)),
            image_url: Set(request.image_url.unwrap_or_default()),
            is_available: Set(request.is_available.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Equipment {} created", item.id);
        Ok(item.into())
    }

    pub async fn update_equipment(
        &self,
        equipment_id: i32,
        request: UpdateEquipmentRequest,
    ) -> AppResult<EquipmentResponse> {
        let mut item = self.find(equipment_id).await?.into_active_model();
        if let Some(name) = request.name {
            item.name = Set(require_text(&name, "Equipment name")?);
        }
        if let Some(category) = request.category {
            item.category = Set(require_text(&category, "Category")?);
        }
        if let Some(v) = request.description {
            item.description = Set(v);
        }
        if let Some(v) = request.rental_price_per_day {
            item.rental_price_per_day_cents = Set(dollars_to_cents(v)?);
        }
        if let Some(v) = request.quantity_available {
            validate_quantity(v)?;
            item.quantity_available = Set(v);
        }
        if let Some(v) = request.condition_status {
            item.condition_status = Set(v);
        }
        if let Some(v) = request.image_url {
            item.image_url = Set(v);
        }
        if let Some(v) = request.is_available {
            item.is_available = Set(v);
        }
        item.updated_at = Set(Utc::now());
        let item = item.update(&self.pool).await?;

        log::info!("Equipment {} updated", equipment_id);
        Ok(item.into())
    }

    /// Deleting equipment also drops its rental history.
    pub async fn delete_equipment(&self, equipment_id: i32) -> AppResult<()> {
        let result = equipment::Entity::delete_by_id(equipment_id)
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Equipment not found".to_string()));
        }
        log::info!("Equipment {} deleted", equipment_id);
        Ok(())
    }

    pub async fn set_status(
        &self,
        equipment_id: i32,
        request: EquipmentStatusRequest,
    ) -> AppResult<EquipmentResponse> {
        let mut item = self.find(equipment_id).await?.into_active_model();
        if let Some(v) = request.condition_status {
            item.condition_status = Set(v);
        }
        if let Some(v) = request.quantity_available {
            validate_quantity(v)?;
            item.quantity_available = Set(v);
        }
        if let Some(v) = request.is_available {
            item.is_available = Set(v);
        }
        item.updated_at = Set(Utc::now());
        let item = item.update(&self.pool).await?;

        log::info!(
            "Equipment {} status: {:?}, available={}, quantity={}",
            item.id,
            item.condition_status,
            item.is_available,
            item.quantity_available
        );
        Ok(item.into())
    }
}

fn validate_quantity(quantity: i32) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::ValidationError(
            "Quantity cannot be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::entities::UserRole;
    use crate::services::tee_time_service::tests::insert_user;
    use chrono::Duration;

    fn equipment_request(price: f64, quantity: i32) -> CreateEquipmentRequest {
        CreateEquipmentRequest {
            name: "Push Cart".to_string(),
            category: "carts".to_string(),
            description: None,
            rental_price_per_day: price,
            quantity_available: quantity,
            condition_status: None,
            image_url: None,
            is_available: None,
        }
    }

    fn rental_request(equipment_id: i32, days: i64, quantity: i32) -> CreateRentalRequest {
        let start = today();
        CreateRentalRequest {
            equipment_id,
            rental_date: start.format("%Y-%m-%d").to_string(),
            due_date: (start + Duration::days(days)).format("%Y-%m-%d").to_string(),
            quantity: Some(quantity),
            notes: None,
        }
    }

    async fn setup(quantity: i32) -> (EquipmentService, i32, i32) {
        let pool = test_pool().await;
        let user_id = insert_user(&pool, "renter@example.com", UserRole::Customer).await;
        let svc = EquipmentService::new(pool);
        let item = svc
            .create_equipment(equipment_request(10.0, quantity))
            .await
            .unwrap();
        (svc, item.id, user_id)
    }

    #[test]
    fn test_pricing() {
        let day0 = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();
        assert_eq!(rental_days(day0, day0), 1);
        assert_eq!(rental_days(day0, day2), 3);

        let price = rental_price(1000, 2, rental_days(day0, day2)).unwrap();
        assert_eq!(price, 6000);
        assert_eq!(deposit(price), 1200);
        assert_eq!(deposit(1234), 247);
    }

    #[test]
    fn test_pricing_overflow_is_rejected() {
        assert!(matches!(
            rental_price(i64::MAX / 2, 3, 1),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            rental_price(10_000_000, i32::MAX, MAX_RENTAL_DAYS),
            Err(AppError::ValidationError(_))
        ));
        assert!(rental_price(10_000_000, 100, MAX_RENTAL_DAYS).is_ok());
    }

    #[tokio::test]
    async fn test_rent_and_return_restores_quantity() {
        let (svc, equipment_id, user_id) = setup(5).await;

        let rental = svc
            .rent(user_id, rental_request(equipment_id, 2, 2))
            .await
            .unwrap();
        assert_eq!(rental.rental_price, 60.0);
        assert_eq!(rental.deposit_amount, 12.0);
        assert_eq!(rental.rental_status, RentalStatus::Rented);
        assert_eq!(svc.get(equipment_id).await.unwrap().quantity_available, 3);
        assert_eq!(rental.user.as_ref().map(|u| u.id), Some(user_id));
        assert_eq!(rental.equipment.as_ref().map(|e| e.quantity_available), Some(3));

        let mine = svc.list_rentals_for_user(user_id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user.as_ref().map(|u| u.id), Some(user_id));
        assert_eq!(mine[0].equipment.as_ref().map(|e| e.id), Some(equipment_id));

        let returned = svc.return_rental(rental.id, Some(user_id)).await.unwrap();
        assert_eq!(returned.rental_status, RentalStatus::Returned);
        assert_eq!(returned.user.as_ref().map(|u| u.id), Some(user_id));
        assert_eq!(returned.equipment.as_ref().map(|e| e.quantity_available), Some(5));
        assert!(returned.returned_at.is_some());
        assert_eq!(svc.get(equipment_id).await.unwrap().quantity_available, 5);

        let err = svc.return_rental(rental.id, Some(user_id)).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_rent_rejects_oversell() {
        let (svc, equipment_id, user_id) = setup(1).await;
        let err = svc
            .rent(user_id, rental_request(equipment_id, 0, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(svc.get(equipment_id).await.unwrap().quantity_available, 1);

        svc.rent(user_id, rental_request(equipment_id, 0, 1))
            .await
            .unwrap();
        // sold out equipment drops off the public list
        assert!(svc.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rent_validation() {
        let (svc, equipment_id, user_id) = setup(3).await;

        let err = svc
            .rent(user_id, rental_request(equipment_id, -1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = svc
            .rent(user_id, rental_request(equipment_id, 1, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = svc
            .rent(user_id, rental_request(equipment_id, MAX_RENTAL_DAYS, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(
            svc.rent(user_id, rental_request(equipment_id, MAX_RENTAL_DAYS - 1, 1))
                .await
                .is_ok()
        );
        assert_eq!(svc.get(equipment_id).await.unwrap().quantity_available, 2);

        svc.set_status(
            equipment_id,
            EquipmentStatusRequest {
                condition_status: Some(ConditionStatus::Maintenance),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let err = svc
            .rent(user_id, rental_request(equipment_id, 1, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_return_by_other_user_is_not_found() {
        let (svc, equipment_id, user_id) = setup(2).await;
        let rental = svc
            .rent(user_id, rental_request(equipment_id, 1, 1))
            .await
            .unwrap();

        let err = svc.return_rental(rental.id, Some(user_id + 100)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // staff may return anyone's rental
        assert_eq!(svc.active_rentals().await.unwrap().len(), 1);
        svc.return_rental(rental.id, None).await.unwrap();
        assert!(svc.active_rentals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filters_category() {
        let (svc, _, _) = setup(2).await;
        let mut clubs = equipment_request(15.0, 4);
        clubs.name = "Premium Driver".to_string();
        clubs.category = "clubs".to_string();
        svc.create_equipment(clubs).await.unwrap();

        assert_eq!(svc.list(None).await.unwrap().len(), 2);
        let only_clubs = svc.list(Some("clubs")).await.unwrap();
        assert_eq!(only_clubs.len(), 1);
        assert_eq!(only_clubs[0].name, "Premium Driver");
    }
}
