use crate::entities::{
    BookingStatus, RentalStatus, SessionStatus, course_entity as courses,
    equipment_entity as equipment, equipment_rental_entity as rentals,
    range_session_entity as sessions, tee_time_entity as tee_times,
};
use crate::error::AppResult;
use crate::models::{ActivityItem, DashboardStats};
use crate::services::sum_cents;
use crate::utils::{cents_to_dollars, now_local, today};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

const ACTIVITY_WINDOW_DAYS: i64 = 30;
const ACTIVITY_PER_KIND: u64 = 10;

/// `Upcoming` until the slot start has passed.
fn schedule_status(date: NaiveDate, start: &str, now: NaiveDateTime) -> &'static str {
    let start = NaiveTime::parse_from_str(start, "%H:%M").unwrap_or(NaiveTime::MIN);
    if date.and_time(start) < now {
        "Completed"
    } else {
        "Upcoming"
    }
}

pub fn rental_activity_status(rental: &rentals::Model, today: NaiveDate) -> &'static str {
    match rental.rental_status {
        RentalStatus::Returned => "Returned",
        RentalStatus::Rented if rental.due_date < today => "Overdue",
        RentalStatus::Rented => "Active",
    }
}

/// Per-user figures for the customer dashboard.
#[derive(Clone)]
pub struct DashboardService {
    pool: DatabaseConnection,
}

impl DashboardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn stats(&self, user_id: i32) -> AppResult<DashboardStats> {
        let today = today();

        let upcoming_tee_times = tee_times::Entity::find()
            .filter(tee_times::Column::UserId.eq(user_id))
            .filter(tee_times::Column::BookingDate.gte(today))
            .filter(tee_times::Column::BookingStatus.eq(BookingStatus::Confirmed))
            .count(&self.pool)
            .await?;
        let range_sessions = sessions::Entity::find()
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::SessionDate.gte(today))
            .filter(sessions::Column::SessionStatus.ne(SessionStatus::Cancelled))
            .count(&self.pool)
            .await?;
        let equipment_rentals = rentals::Entity::find()
            .filter(rentals::Column::UserId.eq(user_id))
            .filter(rentals::Column::RentalStatus.eq(RentalStatus::Rented))
            .count(&self.pool)
            .await?;

        let tee_time_spend = sum_cents(
            &self.pool,
            tee_times::Entity::find()
                .filter(tee_times::Column::UserId.eq(user_id))
                .filter(tee_times::Column::BookingStatus.ne(BookingStatus::Cancelled)),
            tee_times::Column::TotalAmountCents,
        )
        .await?;
        let range_spend = sum_cents(
            &self.pool,
            sessions::Entity::find()
                .filter(sessions::Column::UserId.eq(user_id))
                .filter(sessions::Column::SessionStatus.ne(SessionStatus::Cancelled)),
            sessions::Column::BucketPriceCents,
        )
        .await?;
        let rental_spend = sum_cents(
            &self.pool,
            rentals::Entity::find().filter(rentals::Column::UserId.eq(user_id)),
            rentals::Column::RentalPriceCents,
        )
        .await?;

        Ok(DashboardStats {
            upcoming_tee_times,
            range_sessions,
            equipment_rentals,
            total_spent: cents_to_dollars(tee_time_spend + range_spend + rental_spend),
        })
    }

    /// Bookings, sessions and rentals from the last 30 days onward, newest
    /// first by creation.
    pub async fn activity(&self, user_id: i32) -> AppResult<Vec<ActivityItem>> {
        let now = now_local();
        let today = now.date();
        let since = today - Duration::days(ACTIVITY_WINDOW_DAYS);
        let mut items = Vec::new();

        let bookings = tee_times::Entity::find()
            .filter(tee_times::Column::UserId.eq(user_id))
            .filter(tee_times::Column::BookingDate.gte(since))
            .order_by_desc(tee_times::Column::BookingDate)
            .order_by_desc(tee_times::Column::TeeTime)
            .limit(ACTIVITY_PER_KIND)
            .find_also_related(courses::Entity)
            .all(&self.pool)
            .await?;
        for (booking, course) in bookings {
            let status = if booking.booking_status == BookingStatus::Cancelled {
                "Cancelled"
            } else {
                schedule_status(booking.booking_date, &booking.tee_time, now)
            };
            let course_name = course.map(|c| c.name).unwrap_or_default();
            items.push((
                booking.created_at,
                ActivityItem {
                    id: booking.id,
                    activity_type: "tee_time".to_string(),
                    title: "Tee Time Booked".to_string(),
                    description: format!(
                        "{} - {} at {}",
                        course_name,
                        booking.booking_date.format("%b %-d, %Y"),
                        booking.tee_time
                    ),
                    amount: cents_to_dollars(booking.total_amount_cents),
                    date: booking.created_at.format("%Y-%m-%d").to_string(),
                    status: status.to_string(),
                },
            ));
        }

        let range = sessions::Entity::find()
            .filter(sessions::Column::UserId.eq(user_id))
            .filter(sessions::Column::SessionDate.gte(since))
            .order_by_desc(sessions::Column::SessionDate)
            .order_by_desc(sessions::Column::StartTime)
            .limit(ACTIVITY_PER_KIND)
            .all(&self.pool)
            .await?;
        for session in range {
            let status = if session.session_status == SessionStatus::Cancelled {
                "Cancelled"
            } else {
                schedule_status(session.session_date, &session.start_time, now)
            };
            items.push((
                session.created_at,
                ActivityItem {
                    id: session.id,
                    activity_type: "range_session".to_string(),
                    title: "Range Session".to_string(),
                    description: format!(
                        "Driving Range - {} at {}",
                        session.session_date.format("%b %-d, %Y"),
                        session.start_time
                    ),
                    amount: cents_to_dollars(session.bucket_price_cents),
                    date: session.created_at.format("%Y-%m-%d").to_string(),
                    status: status.to_string(),
                },
            ));
        }

        let rented = rentals::Entity::find()
            .filter(rentals::Column::UserId.eq(user_id))
            .filter(rentals::Column::RentalDate.gte(since))
            .order_by_desc(rentals::Column::RentalDate)
            .limit(ACTIVITY_PER_KIND)
            .find_also_related(equipment::Entity)
            .all(&self.pool)
            .await?;
        for (rental, item) in rented {
            let status = rental_activity_status(&rental, today);
            let name = item.map(|e| e.name).unwrap_or_default();
            items.push((
                rental.created_at,
                ActivityItem {
                    id: rental.id,
                    activity_type: "equipment_rental".to_string(),
                    title: "Equipment Rental".to_string(),
                    description: format!(
                        "{} - rented {}",
                        name,
                        rental.rental_date.format("%b %-d, %Y")
                    ),
                    amount: cents_to_dollars(rental.rental_price_cents),
                    date: rental.created_at.format("%Y-%m-%d").to_string(),
                    status: status.to_string(),
                },
            ));
        }

        items.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(items.into_iter().map(|(_, item)| item).collect())
    }
}
