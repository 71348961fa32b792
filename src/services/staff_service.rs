use crate::entities::{
    BookingStatus, ConditionStatus, RentalStatus, course_entity as courses,
    equipment_entity as equipment, equipment_rental_entity as rentals,
    tee_time_entity as tee_times,
};
use crate::error::AppResult;
use crate::models::StaffStats;
use crate::utils::today;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

/// Front-desk counters. The per-item staff operations live on the domain
/// services they touch.
#[derive(Clone)]
pub struct StaffService {
    pool: DatabaseConnection,
}

impl StaffService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn stats(&self) -> AppResult<StaffStats> {
        Ok(StaffStats {
            todays_bookings: tee_times::Entity::find()
                .filter(tee_times::Column::BookingDate.eq(today()))
                .filter(tee_times::Column::BookingStatus.ne(BookingStatus::Cancelled))
                .count(&self.pool)
                .await?,
            active_rentals: rentals::Entity::find()
                .filter(rentals::Column::RentalStatus.eq(RentalStatus::Rented))
                .count(&self.pool)
                .await?,
            equipment_issues: equipment::Entity::find()
                .filter(equipment::Column::ConditionStatus.eq(ConditionStatus::Maintenance))
                .count(&self.pool)
                .await?,
            course_closures: courses::Entity::find()
                .filter(courses::Column::IsActive.eq(false))
                .count(&self.pool)
                .await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::services::CourseService;
    use crate::services::course_service::tests::course_request;

    #[tokio::test]
    async fn test_stats_counts_closures() {
        let pool = test_pool().await;
        let courses = CourseService::new(pool.clone());
        let closed = courses
            .create_course(course_request("Back Nine", 30.0, 0.0))
            .await
            .unwrap();
        courses
            .create_course(course_request("Front Nine", 30.0, 0.0))
            .await
            .unwrap();
        courses.set_course_status(closed.id, false).await.unwrap();

        let stats = StaffService::new(pool).stats().await.unwrap();
        assert_eq!(
            stats,
            StaffStats {
                todays_bookings: 0,
                active_rentals: 0,
                equipment_issues: 0,
                course_closures: 1,
            }
        );
    }
}
