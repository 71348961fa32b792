use crate::entities::{
    BookingStatus, PaymentStatus, course_entity as courses, tee_time_entity as tee_times,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{cents_to_dollars, format_clock, parse_clock, parse_date, today};
use chrono::{NaiveDate, NaiveTime, Timelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::{HashMap, HashSet};

pub const MAX_PLAYERS: i32 = 4;
const SLOT_MINUTES: u32 = 15;
const FIRST_SLOT_HOUR: u32 = 6;
const CLOSING_HOUR: u32 = 15;

const SLOT_TAKEN: &str = "Tee time slot is already booked";

/// Every slot start in the operating window, ascending.
pub fn slot_times() -> impl Iterator<Item = NaiveTime> {
    (FIRST_SLOT_HOUR * 60..CLOSING_HOUR * 60)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
}

pub fn is_bookable_slot(time: NaiveTime) -> bool {
    time.hour() >= FIRST_SLOT_HOUR
        && time.hour() < CLOSING_HOUR
        && time.minute() % SLOT_MINUTES == 0
        && time.second() == 0
}

/// Slot starts not present in `booked`, as `HH:MM`.
pub fn open_slots(booked: &HashSet<String>) -> Vec<String> {
    slot_times()
        .map(format_clock)
        .filter(|slot| !booked.contains(slot))
        .collect()
}

pub fn tee_time_total(
    green_fee_cents: i64,
    cart_fee_cents: i64,
    players_count: i32,
    cart_required: bool,
) -> i64 {
    let cart = if cart_required { cart_fee_cents } else { 0 };
    green_fee_cents * i64::from(players_count) + cart
}

#[derive(Clone)]
pub struct TeeTimeService {
    pool: DatabaseConnection,
}

impl TeeTimeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn available_slots(&self, course_id: i32, date: &str) -> AppResult<Vec<AvailableSlot>> {
        let date = parse_date(date)?;
        let course = courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let booked = self.booked_slots(course_id, date).await?;
        let date_str = date.format("%Y-%m-%d").to_string();
        let price = cents_to_dollars(course.green_fee_cents);

        Ok(open_slots(&booked)
            .into_iter()
            .zip(1..)
            .map(|(time, id)| AvailableSlot {
                id,
                course_id,
                date: date_str.clone(),
                time,
                available_spots: MAX_PLAYERS,
                price,
                course_name: course.name.clone(),
            })
            .collect())
    }

    async fn booked_slots(&self, course_id: i32, date: NaiveDate) -> AppResult<HashSet<String>> {
        let booked: Vec<String> = tee_times::Entity::find()
            .select_only()
            .column(tee_times::Column::TeeTime)
            .filter(tee_times::Column::CourseId.eq(course_id))
            .filter(tee_times::Column::BookingDate.eq(date))
            .filter(tee_times::Column::BookingStatus.ne(BookingStatus::Cancelled))
            .into_tuple::<String>()
            .all(&self.pool)
            .await?;
        Ok(booked.into_iter().collect())
    }

    pub async fn create_tee_time(
        &self,
        user_id: i32,
        request: CreateTeeTimeRequest,
    ) -> AppResult<TeeTimeResponse> {
        let booking_date = parse_date(&request.booking_date)?;
        if booking_date < today() {
            return Err(AppError::ValidationError(
                "Booking date cannot be in the past".to_string(),
            ));
        }
        if !(1..=MAX_PLAYERS).contains(&request.players_count) {
            return Err(AppError::ValidationError(format!(
                "Players count must be between 1 and {}",
                MAX_PLAYERS
            )));
        }
        let slot = parse_clock(&request.tee_time)?;
        if !is_bookable_slot(slot) {
            return Err(AppError::ValidationError(
                "Tee time must be a 15-minute slot between 06:00 and 14:45".to_string(),
            ));
        }
        let slot = format_clock(slot);

        let course = courses::Entity::find_by_id(request.course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
        if !course.is_active {
            return Err(AppError::ValidationError(
                "Course is not open for booking".to_string(),
            ));
        }

        if self
            .booked_slots(course.id, booking_date)
            .await?
            .contains(&slot)
        {
            return Err(AppError::Conflict(SLOT_TAKEN.to_string()));
        }

        let total = tee_time_total(
            course.green_fee_cents,
            course.cart_fee_cents,
            request.players_count,
            request.cart_required,
        );

        let now = Utc::now();
        // The partial unique index settles concurrent inserts for the same slot.
        let booking = tee_times::ActiveModel {
            course_id: Set(course.id),
            user_id: Set(user_id),
            booking_date: Set(booking_date),
            tee_time: Set(slot),
            players_count: Set(request.players_count),
            cart_required: Set(request.cart_required),
            total_amount_cents: Set(total),
            payment_status: Set(PaymentStatus::Pending),
            booking_status: Set(BookingStatus::Confirmed),
            special_requests: Set(request.special_requests.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, SLOT_TAKEN))?;

        log::info!(
            "Tee time {} booked: course {} on {} at {} by user {}",
            booking.id,
            booking.course_id,
            booking.booking_date,
            booking.tee_time,
            user_id
        );

        let user = users::Entity::find_by_id(user_id).one(&self.pool).await?;
        Ok(TeeTimeResponse::from(booking)
            .with_course(Some(course))
            .with_user(user))
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<TeeTimeResponse>> {
        let rows = tee_times::Entity::find()
            .filter(tee_times::Column::UserId.eq(user_id))
            .order_by_desc(tee_times::Column::BookingDate)
            .order_by_desc(tee_times::Column::TeeTime)
            .all(&self.pool)
            .await?;
        self.with_details(rows).await
    }

    /// Staff transition. Reopening a cancelled booking fails with `Conflict`
    /// when its slot has been taken since.
    pub async fn update_booking_status(
        &self,
        booking_id: i32,
        status: BookingStatus,
    ) -> AppResult<TeeTimeResponse> {
        let booking = tee_times::Entity::find_by_id(booking_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let mut active = booking.into_active_model();
        active.booking_status = Set(status);
        active.updated_at = Set(Utc::now());
        let booking = active
            .update(&self.pool)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, SLOT_TAKEN))?;

        log::info!("Tee time {} status set to {:?}", booking_id, status);
        let mut details = self.with_details(vec![booking]).await?;
        details
            .pop()
            .ok_or_else(|| AppError::InternalError("Booking vanished after update".to_string()))
    }

    /// Today's non-cancelled bookings in slot order.
    pub async fn todays_bookings(&self) -> AppResult<Vec<TeeTimeResponse>> {
        let rows = tee_times::Entity::find()
            .filter(tee_times::Column::BookingDate.eq(today()))
            .filter(tee_times::Column::BookingStatus.ne(BookingStatus::Cancelled))
            .order_by_asc(tee_times::Column::TeeTime)
            .all(&self.pool)
            .await?;
        self.with_details(rows).await
    }

    pub async fn list_bookings(
        &self,
        query: &BookingListQuery,
    ) -> AppResult<PaginatedResponse<TeeTimeResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);
        let mut select = tee_times::Entity::find();
        if let Some(status) = query.status {
            select = select.filter(tee_times::Column::BookingStatus.eq(status));
        }
        if let Some(date) = query.date.as_deref() {
            select = select.filter(tee_times::Column::BookingDate.eq(parse_date(date)?));
        }

        let total = select.clone().count(&self.pool).await?;
        let rows = select
            .order_by_desc(tee_times::Column::BookingDate)
            .order_by_desc(tee_times::Column::TeeTime)
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

    /// Attaches course and booker summaries.
    async fn with_details(&self, rows: Vec<tee_times::Model>) -> AppResult<Vec<TeeTimeResponse>> {
        let course_ids: HashSet<i32> = rows.iter().map(|r| r.course_id).collect();
        let user_ids: HashSet<i32> = rows.iter().map(|r| r.user_id).collect();

        let course_map: HashMap<i32, courses::Model> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
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
                let course = course_map.get(&row.course_id).cloned();
                let user = user_map.get(&row.user_id).cloned();
                TeeTimeResponse::from(row).with_course(course).with_user(user)
            })
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::entities::UserRole;
    use crate::services::CourseService;
    use crate::services::course_service::tests::course_request;
    use chrono::Duration;

    pub(crate) async fn insert_user(pool: &DatabaseConnection, email: &str, role: UserRole) -> i32 {
        let now = Utc::now();
        users::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set("x".to_string()),
            first_name: Set("Test".to_string()),
            last_name: Set("Golfer".to_string()),
            phone: Set(String::new()),
            date_of_birth: Set(None),
            role: Set(role),
            membership_type: Set("basic".to_string()),
            membership_expiry: Set(None),
            handicap: Set(None),
            is_active: Set(true),
            email_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(pool)
        .await
        .unwrap()
        .id
    }

    fn request(course_id: i32, date: NaiveDate, time: &str, players: i32) -> CreateTeeTimeRequest {
        CreateTeeTimeRequest {
            course_id,
            booking_date: date.format("%Y-%m-%d").to_string(),
            tee_time: time.to_string(),
            players_count: players,
            cart_required: true,
            special_requests: None,
        }
    }

    async fn setup() -> (TeeTimeService, i32, i32) {
        let pool = test_pool().await;
        let course = CourseService::new(pool.clone())
            .create_course(course_request("Pinewoods", 50.0, 20.0))
            .await
            .unwrap();
        let user_id = insert_user(&pool, "golfer@example.com", UserRole::Customer).await;
        (TeeTimeService::new(pool), course.id, user_id)
    }

    #[test]
    fn test_slot_grid() {
        let slots = open_slots(&HashSet::new());
        assert_eq!(slots.len(), 36);
        assert_eq!(slots.first().unwrap(), "06:00");
        assert_eq!(slots.last().unwrap(), "14:45");

        let booked: HashSet<String> = ["06:15".to_string(), "10:00".to_string()].into();
        let slots = open_slots(&booked);
        assert_eq!(slots.len(), 34);
        assert!(!slots.contains(&"06:15".to_string()));
        let mut sorted = slots.clone();
        sorted.sort();
        assert_eq!(slots, sorted);
    }

    #[test]
    fn test_bookable_slot() {
        assert!(is_bookable_slot(NaiveTime::from_hms_opt(6, 0, 0).unwrap()));
        assert!(is_bookable_slot(NaiveTime::from_hms_opt(14, 45, 0).unwrap()));
        assert!(!is_bookable_slot(NaiveTime::from_hms_opt(15, 0, 0).unwrap()));
        assert!(!is_bookable_slot(NaiveTime::from_hms_opt(5, 45, 0).unwrap()));
        assert!(!is_bookable_slot(NaiveTime::from_hms_opt(8, 10, 0).unwrap()));
    }

    #[test]
    fn test_total() {
        assert_eq!(tee_time_total(5000, 2000, 3, true), 17000);
        assert_eq!(tee_time_total(5000, 2000, 3, false), 15000);
    }

    #[tokio::test]
    async fn test_booking_removes_slot_and_second_booking_conflicts() {
        let (svc, course_id, user_id) = setup().await;
        let date = today() + Duration::days(3);

        let booking = svc
            .create_tee_time(user_id, request(course_id, date, "08:30", 2))
            .await
            .unwrap();
        assert_eq!(booking.total_amount, 120.0);
        assert_eq!(booking.course_name.as_deref(), Some("Pinewoods"));
        let course = booking.course.as_ref().expect("course summary");
        assert_eq!(course.id, course_id);
        assert_eq!(course.name, "Pinewoods");
        let booker = booking.user.as_ref().expect("booker summary");
        assert_eq!(booker.id, user_id);
        assert_eq!(booker.email, "golfer@example.com");

        let slots = svc
            .available_slots(course_id, &date.format("%Y-%m-%d").to_string())
            .await
            .unwrap();
        assert_eq!(slots.len(), 35);
        assert!(slots.iter().all(|s| s.time != "08:30"));
        assert_eq!(slots[0].id, 1);
        assert_eq!(slots[0].price, 50.0);
        assert_eq!(slots[0].available_spots, 4);

        let err = svc
            .create_tee_time(user_id, request(course_id, date, "08:30", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_cancelled_booking_frees_slot() {
        let (svc, course_id, user_id) = setup().await;
        let date = today() + Duration::days(1);

        let first = svc
            .create_tee_time(user_id, request(course_id, date, "09:00", 4))
            .await
            .unwrap();
        svc.update_booking_status(first.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        let second = svc
            .create_tee_time(user_id, request(course_id, date, "09:00", 2))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);

        // reopening the cancelled one would double-book the slot
        let err = svc
            .update_booking_status(first.id, BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_booking_validation() {
        let (svc, course_id, user_id) = setup().await;
        let tomorrow = today() + Duration::days(1);

        for (date, time, players) in [
            (today() - Duration::days(1), "08:00", 2),
            (tomorrow, "08:00", 0),
            (tomorrow, "08:00", 5),
            (tomorrow, "08:05", 2),
            (tomorrow, "15:00", 2),
        ] {
            let err = svc
                .create_tee_time(user_id, request(course_id, date, time, players))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)), "{time} {players}");
        }

        let err = svc
            .create_tee_time(user_id, request(9999, tomorrow, "08:00", 2))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_listing_for_user_and_admin() {
        let (svc, course_id, user_id) = setup().await;
        let date = today() + Duration::days(2);
        svc.create_tee_time(user_id, request(course_id, date, "07:00", 1))
            .await
            .unwrap();
        svc.create_tee_time(user_id, request(course_id, date, "07:15", 1))
            .await
            .unwrap();

        let mine = svc.list_for_user(user_id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].tee_time, "07:15");
        assert!(mine.iter().all(|b| {
            b.course.as_ref().map(|c| c.id) == Some(course_id)
                && b.user.as_ref().map(|u| u.id) == Some(user_id)
        }));

        let page = svc
            .list_bookings(&BookingListQuery {
                page: Some(1),
                page_size: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.data.len(), 1);
        assert!(page.data[0].user.is_some());
    }
}
