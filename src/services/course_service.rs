use crate::entities::{course_entity as courses, hole_entity as holes};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{dollars_to_cents, require_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashSet;

#[derive(Clone)]
pub struct CourseService {
    pool: DatabaseConnection,
}

impl CourseService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Active courses with their holes, by name.
    pub async fn list_courses(&self) -> AppResult<Vec<CourseResponse>> {
        let rows = courses::Entity::find()
            .filter(courses::Column::IsActive.eq(true))
            .order_by_asc(courses::Column::Name)
            .find_with_related(holes::Entity)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(course, holes)| CourseResponse::with_holes(course, holes))
            .collect())
    }

    pub async fn get_course(&self, course_id: i32) -> AppResult<CourseResponse> {
        let course = self.find_course(course_id).await?;
        let holes = course.find_related(holes::Entity).all(&self.pool).await?;
        Ok(CourseResponse::with_holes(course, holes))
    }

    pub async fn find_course(&self, course_id: i32) -> AppResult<courses::Model> {
        courses::Entity::find_by_id(course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }

    pub async fn create_course(&self, request: CreateCourseRequest) -> AppResult<CourseResponse> {
        let name = require_text(&request.name, "Course name")?;
        let total_holes = request.total_holes.unwrap_or(18);
        let par = request.par.unwrap_or(72);
        validate_layout(par, total_holes)?;
        validate_holes(&request.holes, total_holes)?;

        let now = Utc::now();
        let txn = self.pool.begin().await?;

        let course = courses::ActiveModel {
            name: Set(name),
            description: Set(request.description.unwrap_or_default()),
            address: Set(request.address.unwrap_or_default()),
            phone: Set(request.phone.unwrap_or_default()),
            email: Set(request.email.unwrap_or_default()),
            par: Set(par),
            total_holes: Set(total_holes),
            course_rating: Set(request.course_rating),
            slope_rating: Set(request.slope_rating),
            green_fee_cents: Set(dollars_to_cents(request.green_fee)?),
            cart_fee_cents: Set(dollars_to_cents(request.cart_fee.unwrap_or(0.0))?),
            is_active: Set(request.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let holes = insert_holes(&txn, course.id, &request.holes).await?;
        txn.commit().await?;

        log::info!("Course {} created", course.id);
        Ok(CourseResponse::with_holes(course, holes))
    }

    pub async fn update_course(
        &self,
        course_id: i32,
        request: UpdateCourseRequest,
    ) -> AppResult<CourseResponse> {
        let txn = self.pool.begin().await?;

        let existing = courses::Entity::find_by_id(course_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        let par = request.par.unwrap_or(existing.par);
        let total_holes = request.total_holes.unwrap_or(existing.total_holes);
        validate_layout(par, total_holes)?;

        let mut course = existing.into_active_model();
        if let Some(name) = request.name {
            course.name = Set(require_text(&name, "Course name")?);
        }
        if let Some(v) = request.description {
            course.description = Set(v);
        }
        if let Some(v) = request.address {
            course.address = Set(v);
        }
        if let Some(v) = request.phone {
            course.phone = Set(v);
        }
        if let Some(v) = request.email {
            course.email = Set(v);
        }
        course.par = Set(par);
        course.total_holes = Set(total_holes);
        if let Some(v) = request.course_rating {
            course.course_rating = Set(Some(v));
        }
        if let Some(v) = request.slope_rating {
            course.slope_rating = Set(Some(v));
        }
        if let Some(v) = request.green_fee {
            course.green_fee_cents = Set(dollars_to_cents(v)?);
        }
        if let Some(v) = request.cart_fee {
            course.cart_fee_cents = Set(dollars_to_cents(v)?);
        }
        if let Some(v) = request.is_active {
            course.is_active = Set(v);
        }
        course.updated_at = Set(Utc::now());
        let course = course.update(&txn).await?;

        let holes = match request.holes {
            Some(new_holes) => {
                validate_holes(&new_holes, total_holes)?;
                holes::Entity::delete_many()
                    .filter(holes::Column::CourseId.eq(course_id))
                    .exec(&txn)
                    .await?;
                insert_holes(&txn, course_id, &new_holes).await?
            }
            None => course.find_related(holes::Entity).all(&txn).await?,
        };

        txn.commit().await?;
        log::info!("Course {} updated", course_id);
        Ok(CourseResponse::with_holes(course, holes))
    }

    /// Removes the course together with its holes, bookings, scorecards and
    /// weather readings.
    pub async fn delete_course(&self, course_id: i32) -> AppResult<()> {
        let result = courses::Entity::delete_by_id(course_id)
            .exec(&self.pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Course not found".to_string()));
        }
        log::info!("Course {} deleted", course_id);
        Ok(())
    }

    pub async fn set_course_status(
        &self,
        course_id: i32,
        is_active: bool,
    ) -> AppResult<CourseResponse> {
        let mut course = self.find_course(course_id).await?.into_active_model();
        course.is_active = Set(is_active);
        course.updated_at = Set(Utc::now());
        let course = course.update(&self.pool).await?;

        log::info!("Course {} is_active set to {}", course_id, is_active);
        let holes = course.find_related(holes::Entity).all(&self.pool).await?;
        Ok(CourseResponse::with_holes(course, holes))
    }
}

fn validate_layout(par: i32, total_holes: i32) -> AppResult<()> {
    if !(1..=36).contains(&total_holes) {
        return Err(AppError::ValidationError(
            "Total holes must be between 1 and 36".to_string(),
        ));
    }
    if par < total_holes {
        return Err(AppError::ValidationError(
            "Par cannot be lower than the number of holes".to_string(),
        ));
    }
    Ok(())
}

fn validate_holes(input: &[HoleInput], total_holes: i32) -> AppResult<()> {
    let mut seen = HashSet::new();
    for hole in input {
        if !(1..=total_holes).contains(&hole.hole_number) {
            return Err(AppError::ValidationError(format!(
                "Hole number {} is outside 1..={}",
                hole.hole_number, total_holes
            )));
        }
        if !(3..=6).contains(&hole.par) {
            return Err(AppError::ValidationError(format!(
                "Hole {} has an invalid par of {}",
                hole.hole_number, hole.par
            )));
        }
        if !seen.insert(hole.hole_number) {
            return Err(AppError::ValidationError(format!(
                "Hole {} is listed twice",
                hole.hole_number
            )));
        }
    }
    Ok(())
}

async fn insert_holes<C: ConnectionTrait>(
    db: &C,
    course_id: i32,
    input: &[HoleInput],
) -> AppResult<Vec<holes::Model>> {
    let mut created = Vec::with_capacity(input.len());
    for hole in input {
        let model = holes::ActiveModel {
            course_id: Set(course_id),
            hole_number: Set(hole.hole_number),
            par: Set(hole.par),
            yardage: Set(hole.yardage.unwrap_or(0)),
            handicap_index: Set(hole.handicap_index.unwrap_or(0)),
            description: Set(hole.description.clone().unwrap_or_default()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        created.push(model);
    }
    Ok(created)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::database::test_pool;

    pub(crate) fn course_request(name: &str, green_fee: f64, cart_fee: f64) -> CreateCourseRequest {
        CreateCourseRequest {
            name: name.to_string(),
            description: None,
            address: None,
            phone: None,
            email: None,
            par: Some(72),
            total_holes: Some(18),
            course_rating: Some(72.4),
            slope_rating: Some(131),
            green_fee,
            cart_fee: Some(cart_fee),
            is_active: None,
            holes: vec![
                HoleInput {
                    hole_number: 2,
                    par: 3,
                    yardage: Some(165),
                    handicap_index: Some(17),
                    description: None,
                },
                HoleInput {
                    hole_number: 1,
                    par: 4,
                    yardage: Some(410),
                    handicap_index: Some(5),
                    description: Some("Dogleg left".to_string()),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_create_and_get_course() {
        let svc = CourseService::new(test_pool().await);
        let created = svc
            .create_course(course_request("Pinewoods", 85.0, 25.0))
            .await
            .unwrap();
        assert_eq!(created.green_fee, 85.0);
        assert_eq!(created.cart_fee, 25.0);

        let fetched = svc.get_course(created.id).await.unwrap();
        let numbers: Vec<i32> = fetched.holes.iter().map(|h| h.hole_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_list_hides_inactive_courses() {
        let svc = CourseService::new(test_pool().await);
        let a = svc.create_course(course_request("Alpha", 50.0, 0.0)).await.unwrap();
        svc.create_course(course_request("Bravo", 60.0, 0.0)).await.unwrap();
        svc.set_course_status(a.id, false).await.unwrap();

        let listed = svc.list_courses().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Bravo");
        assert_eq!(listed[0].holes.len(), 2);
    }

    #[tokio::test]
    async fn test_update_replaces_holes() {
        let svc = CourseService::new(test_pool().await);
        let created = svc
            .create_course(course_request("Pinewoods", 85.0, 25.0))
            .await
            .unwrap();

        let updated = svc
            .update_course(
                created.id,
                UpdateCourseRequest {
                    green_fee: Some(90.5),
                    holes: Some(vec![HoleInput {
                        hole_number: 18,
                        par: 5,
                        yardage: None,
                        handicap_index: None,
                        description: None,
                    }]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.green_fee, 90.5);
        assert_eq!(updated.holes.len(), 1);
        assert_eq!(updated.holes[0].hole_number, 18);
    }

    #[tokio::test]
    async fn test_rejects_oversized_fees() {
        let svc = CourseService::new(test_pool().await);
        for (green, cart) in [(1e18, 0.0), (50.0, 2e6)] {
            assert!(matches!(
                svc.create_course(course_request("Gilded", green, cart))
                    .await
                    .unwrap_err(),
                AppError::ValidationError(_)
            ));
        }
        assert!(svc.list_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_duplicate_holes_and_missing_course() {
        let svc = CourseService::new(test_pool().await);
        let mut request = course_request("Dupes", 40.0, 0.0);
        request.holes[0].hole_number = 1;
        assert!(matches!(
            svc.create_course(request).await.unwrap_err(),
            AppError::ValidationError(_)
        ));

        assert!(matches!(
            svc.delete_course(999).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }
}
