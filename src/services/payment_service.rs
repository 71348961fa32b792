use crate::entities::{
    BookingStatus, PaymentStatus, ReferenceType, SessionStatus, TransactionStatus,
    equipment_rental_entity as rentals, payment_entity as payments,
    range_session_entity as sessions, tee_time_entity as tee_times,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

const DEFAULT_METHOD: &str = "credit_card";
const CURRENCY: &str = "USD";
const ALREADY_PAID: &str = "This item has already been paid";

/// Records payments against the caller's own bookings. Nothing is charged;
/// the referenced row is flipped to `paid` in the same transaction.
#[derive(Clone)]
pub struct PaymentService {
    pool: DatabaseConnection,
}

impl PaymentService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i32,
        request: CreatePaymentRequest,
    ) -> AppResult<PaymentResponse> {
        let method = request
            .payment_method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_METHOD)
            .to_string();

        let txn = self.pool.begin().await?;
        let amount = match request.reference_type {
            ReferenceType::TeeTime => settle_tee_time(&txn, user_id, request.reference_id).await?,
            ReferenceType::RangeSession => {
                settle_range_session(&txn, user_id, request.reference_id).await?
            }
            ReferenceType::EquipmentRental => {
                settle_rental(&txn, user_id, request.reference_id).await?
            }
        };

        let now = Utc::now();
        let payment = payments::ActiveModel {
            user_id: Set(user_id),
            reference_type: Set(request.reference_type),
            reference_id: Set(request.reference_id),
            amount_cents: Set(amount),
            currency: Set(CURRENCY.to_string()),
            payment_method: Set(method),
            payment_status: Set(TransactionStatus::Completed),
            failure_reason: Set(String::new()),
            processed_at: Set(Some(now)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        log::info!(
            "Payment {} of {} cents recorded for {:?} {} by user {}",
            payment.id,
            amount,
            payment.reference_type,
            payment.reference_id,
            user_id
        );
        Ok(payment.into())
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<PaymentResponse>> {
        let rows = payments::Entity::find()
            .filter(payments::Column::UserId.eq(user_id))
            .order_by_desc(payments::Column::CreatedAt)
            .order_by_desc(payments::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

async fn settle_tee_time(txn: &DatabaseTransaction, user_id: i32, id: i32) -> AppResult<i64> {
    let booking = tee_times::Entity::find_by_id(id)
        .filter(tee_times::Column::UserId.eq(user_id))
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
    if booking.booking_status == BookingStatus::Cancelled {
        return Err(AppError::ValidationError(
            "Cannot pay for a cancelled booking".to_string(),
        ));
    }

    let updated = tee_times::Entity::update_many()
        .col_expr(tee_times::Column::PaymentStatus, Expr::value(PaymentStatus::Paid))
        .col_expr(tee_times::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(tee_times::Column::Id.eq(id))
        .filter(tee_times::Column::PaymentStatus.ne(PaymentStatus::Paid))
        .exec(txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(AppError::Conflict(ALREADY_PAID.to_string()));
    }
    Ok(booking.total_amount_cents)
}

async fn settle_range_session(txn: &DatabaseTransaction, user_id: i32, id: i32) -> AppResult<i64> {
    let session = sessions::Entity::find_by_id(id)
        .filter(sessions::Column::UserId.eq(user_id))
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Range session not found".to_string()))?;
    if session.session_status == SessionStatus::Cancelled {
        return Err(AppError::ValidationError(
            "Cannot pay for a cancelled session".to_string(),
        ));
    }

    let updated = sessions::Entity::update_many()
        .col_expr(sessions::Column::PaymentStatus, Expr::value(PaymentStatus::Paid))
        .col_expr(sessions::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(sessions::Column::Id.eq(id))
        .filter(sessions::Column::PaymentStatus.ne(PaymentStatus::Paid))
        .exec(txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(AppError::Conflict(ALREADY_PAID.to_string()));
    }
    Ok(session.bucket_price_cents)
}

async fn settle_rental(txn: &DatabaseTransaction, user_id: i32, id: i32) -> AppResult<i64> {
    let rental = rentals::Entity::find_by_id(id)
        .filter(rentals::Column::UserId.eq(user_id))
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;

    let updated = rentals::Entity::update_many()
        .col_expr(rentals::Column::PaymentStatus, Expr::value(PaymentStatus::Paid))
        .col_expr(rentals::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(rentals::Column::Id.eq(id))
        .filter(rentals::Column::PaymentStatus.ne(PaymentStatus::Paid))
        .exec(txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(AppError::Conflict(ALREADY_PAID.to_string()));
    }
    Ok(rental.rental_price_cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::entities::UserRole;
    use crate::services::course_service::tests::course_request;
    use crate::services::tee_time_service::tests::insert_user;
    use crate::services::{CourseService, TeeTimeService};
    use crate::utils::today;
    use chrono::Duration;

    async fn booked_tee_time(pool: &DatabaseConnection, user_id: i32) -> i32 {
        let course = CourseService::new(pool.clone())
            .create_course(course_request("Pinewoods", 50.0, 20.0))
            .await
            .unwrap();
        TeeTimeService::new(pool.clone())
            .create_tee_time(
                user_id,
                CreateTeeTimeRequest {
                    course_id: course.id,
                    booking_date: (today() + Duration::days(1)).format("%Y-%m-%d").to_string(),
                    tee_time: "10:00".to_string(),
                    players_count: 2,
                    cart_required: true,
                    special_requests: None,
                },
            )
            .await
            .unwrap()
            .id
    }

    fn pay(reference_id: i32) -> CreatePaymentRequest {
        CreatePaymentRequest {
            reference_type: ReferenceType::TeeTime,
            reference_id,
            payment_method: None,
        }
    }

    #[tokio::test]
    async fn test_pay_tee_time_once() {
        let pool = test_pool().await;
        let user_id = insert_user(&pool, "payer@example.com", UserRole::Customer).await;
        let booking_id = booked_tee_time(&pool, user_id).await;
        let svc = PaymentService::new(pool.clone());

        let payment = svc.create(user_id, pay(booking_id)).await.unwrap();
        assert_eq!(payment.amount, 120.0);
        assert_eq!(payment.payment_status, TransactionStatus::Completed);
        assert_eq!(payment.payment_method, "credit_card");

        let booking = tee_times::Entity::find_by_id(booking_id)
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::Paid);

        let err = svc.create(user_id, pay(booking_id)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(svc.list_for_user(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cannot_pay_for_someone_else() {
        let pool = test_pool().await;
        let owner = insert_user(&pool, "owner@example.com", UserRole::Customer).await;
        let other = insert_user(&pool, "other@example.com", UserRole::Customer).await;
        let booking_id = booked_tee_time(&pool, owner).await;

        let err = PaymentService::new(pool)
            .create(other, pay(booking_id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
