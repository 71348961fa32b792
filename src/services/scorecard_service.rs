use crate::entities::{
    course_entity as courses, hole_entity as holes, scorecard_entity as scorecards,
    scorecard_hole_entity as scorecard_holes, tee_time_entity as tee_times,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::parse_date;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

pub const MAX_STROKES_PER_HOLE: i32 = 20;

/// Round totals derived from the per-hole entries. All `None` for a card
/// without holes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RoundTotals {
    pub score: Option<i32>,
    pub putts: Option<i32>,
    pub fairways_hit: Option<i32>,
    pub greens_in_regulation: Option<i32>,
}

pub fn round_totals(entries: &[ScorecardHoleInput]) -> RoundTotals {
    if entries.is_empty() {
        return RoundTotals::default();
    }
    RoundTotals {
        score: Some(entries.iter().map(|h| h.strokes).sum()),
        putts: Some(entries.iter().map(|h| h.putts).sum()),
        fairways_hit: Some(entries.iter().filter(|h| h.fairway_hit).count() as i32),
        greens_in_regulation: Some(entries.iter().filter(|h| h.green_in_regulation).count() as i32),
    }
}

fn validate_entry(entry: &ScorecardHoleInput) -> AppResult<()> {
    if !(1..=MAX_STROKES_PER_HOLE).contains(&entry.strokes) {
        return Err(AppError::ValidationError(format!(
            "Hole {}: strokes must be between 1 and {}",
            entry.hole_number, MAX_STROKES_PER_HOLE
        )));
    }
    if entry.putts < 0 || entry.sand_saves < 0 || entry.penalties < 0 {
        return Err(AppError::ValidationError(format!(
            "Hole {}: counts cannot be negative",
            entry.hole_number
        )));
    }
    if entry.putts > entry.strokes
        || entry.sand_saves > entry.strokes
        || entry.penalties > entry.strokes
    {
        return Err(AppError::ValidationError(format!(
            "Hole {}: counts cannot exceed strokes",
            entry.hole_number
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ScorecardService {
    pool: DatabaseConnection,
}

impl ScorecardService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i32,
        request: CreateScorecardRequest,
    ) -> AppResult<ScorecardResponse> {
        let played_date = parse_date(&request.played_date)?;

        let course = courses::Entity::find_by_id(request.course_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if let Some(tee_time_id) = request.tee_time_id {
            tee_times::Entity::find_by_id(tee_time_id)
                .filter(tee_times::Column::UserId.eq(user_id))
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Tee time not found".to_string()))?;
        }

        let hole_ids: HashMap<i32, i32> = course
            .find_related(holes::Entity)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|h| (h.hole_number, h.id))
            .collect();

        let mut seen = HashSet::new();
        for entry in &request.holes {
            validate_entry(entry)?;
            if !hole_ids.contains_key(&entry.hole_number) {
                return Err(AppError::ValidationError(format!(
                    "Hole {} does not exist on this course",
                    entry.hole_number
                )));
            }
            if !seen.insert(entry.hole_number) {
                return Err(AppError::ValidationError(format!(
                    "Hole {} is scored twice",
                    entry.hole_number
                )));
            }
        }

        let totals = round_totals(&request.holes);
        let txn = self.pool.begin().await?;

        let card = scorecards::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course.id),
            tee_time_id: Set(request.tee_time_id),
            played_date: Set(played_date),
            total_score: Set(totals.score),
            total_putts: Set(totals.putts),
            fairways_hit: Set(totals.fairways_hit),
            greens_in_regulation: Set(totals.greens_in_regulation),
            handicap_used: Set(request.handicap_used),
            weather_conditions: Set(request.weather_conditions.unwrap_or_default()),
            notes: Set(request.notes.unwrap_or_default()),
            is_tournament_round: Set(request.is_tournament_round),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut entries = Vec::with_capacity(request.holes.len());
        for entry in &request.holes {
            let row = scorecard_holes::ActiveModel {
                scorecard_id: Set(card.id),
                hole_id: Set(hole_ids[&entry.hole_number]),
                strokes: Set(entry.strokes),
                putts: Set(entry.putts),
                fairway_hit: Set(entry.fairway_hit),
                green_in_regulation: Set(entry.green_in_regulation),
                sand_saves: Set(entry.sand_saves),
                penalties: Set(entry.penalties),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            entries.push(row);
        }

        txn.commit().await?;
        log::info!(
            "Scorecard {} recorded for user {} on course {}",
            card.id,
            user_id,
            course.id
        );

        let numbers = hole_ids.into_iter().map(|(number, id)| (id, number)).collect();
        Ok(assemble(card, entries, &numbers))
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<ScorecardResponse>> {
        let rows = scorecards::Entity::find()
            .filter(scorecards::Column::UserId.eq(user_id))
            .order_by_desc(scorecards::Column::PlayedDate)
            .order_by_desc(scorecards::Column::Id)
            .find_with_related(scorecard_holes::Entity)
            .all(&self.pool)
            .await?;

        let hole_ids: HashSet<i32> = rows
            .iter()
            .flat_map(|(_, entries)| entries.iter().map(|e| e.hole_id))
            .collect();
        let numbers = self.hole_numbers(hole_ids).await?;

        Ok(rows
            .into_iter()
            .map(|(card, entries)| assemble(card, entries, &numbers))
            .collect())
    }

    /// Cards of other users are reported as missing.
    pub async fn get(&self, scorecard_id: i32, user_id: i32) -> AppResult<ScorecardResponse> {
        let card = scorecards::Entity::find_by_id(scorecard_id)
            .filter(scorecards::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Scorecard not found".to_string()))?;

        let entries = card
            .find_related(scorecard_holes::Entity)
            .all(&self.pool)
            .await?;
        let numbers = self
            .hole_numbers(entries.iter().map(|e| e.hole_id).collect())
            .await?;
        Ok(assemble(card, entries, &numbers))
    }

    async fn hole_numbers(&self, hole_ids: HashSet<i32>) -> AppResult<HashMap<i32, i32>> {
        if hole_ids.is_empty() {
            return Ok(HashMap::new());
        }
        Ok(holes::Entity::find()
            .filter(holes::Column::Id.is_in(hole_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|h| (h.id, h.hole_number))
            .collect())
    }
}

fn assemble(
    card: scorecards::Model,
    entries: Vec<scorecard_holes::Model>,
    numbers: &HashMap<i32, i32>,
) -> ScorecardResponse {
    let mut holes: Vec<ScorecardHoleResponse> = entries
        .into_iter()
        .map(|entry| {
            let number = numbers.get(&entry.hole_id).copied();
            ScorecardHoleResponse {
                hole_number: number,
                ..entry.into()
            }
        })
        .collect();
    holes.sort_by_key(|h| (h.hole_number.unwrap_or(i32::MAX), h.id));

    ScorecardResponse {
        holes,
        ..card.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use crate::entities::UserRole;
    use crate::services::CourseService;
    use crate::services::course_service::tests::course_request;
    use crate::services::tee_time_service::tests::insert_user;

    fn entry(hole_number: i32, strokes: i32, putts: i32, fairway: bool, gir: bool) -> ScorecardHoleInput {
        ScorecardHoleInput {
            hole_number,
            strokes,
            putts,
            fairway_hit: fairway,
            green_in_regulation: gir,
            sand_saves: 0,
            penalties: 0,
        }
    }

    fn request(course_id: i32, holes: Vec<ScorecardHoleInput>) -> CreateScorecardRequest {
        CreateScorecardRequest {
            course_id,
            tee_time_id: None,
            played_date: "2025-06-14".to_string(),
            handicap_used: Some(12.4),
            weather_conditions: None,
            notes: None,
            is_tournament_round: false,
            holes,
        }
    }

    async fn setup() -> (ScorecardService, i32, i32) {
        let pool = test_pool().await;
        let course = CourseService::new(pool.clone())
            .create_course(course_request("Pinewoods", 50.0, 0.0))
            .await
            .unwrap();
        let user_id = insert_user(&pool, "scorer@example.com", UserRole::Customer).await;
        (ScorecardService::new(pool), course.id, user_id)
    }

    #[test]
    fn test_round_totals() {
        let totals = round_totals(&[entry(1, 5, 2, true, false), entry(2, 3, 1, false, true)]);
        assert_eq!(totals.score, Some(8));
        assert_eq!(totals.putts, Some(3));
        assert_eq!(totals.fairways_hit, Some(1));
        assert_eq!(totals.greens_in_regulation, Some(1));
        assert_eq!(round_totals(&[]), RoundTotals::default());
    }

    #[tokio::test]
    async fn test_create_and_fetch_scorecard() {
        let (svc, course_id, user_id) = setup().await;
        let card = svc
            .create(
                user_id,
                request(course_id, vec![entry(2, 3, 1, false, true), entry(1, 5, 2, true, false)]),
            )
            .await
            .unwrap();
        assert_eq!(card.total_score, Some(8));
        assert_eq!(card.holes.len(), 2);
        assert_eq!(card.holes[0].hole_number, Some(1));

        let fetched = svc.get(card.id, user_id).await.unwrap();
        assert_eq!(fetched.holes[1].hole_number, Some(2));
        assert_eq!(fetched.holes[1].strokes, 3);

        let listed = svc.list_for_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].holes.len(), 2);

        let err = svc.get(card.id, user_id + 1).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rejects_unknown_or_invalid_holes() {
        let (svc, course_id, user_id) = setup().await;
        for holes in [
            vec![entry(7, 4, 2, true, true)],
            vec![entry(1, 4, 2, true, true), entry(1, 5, 2, true, true)],
            vec![entry(1, 0, 0, false, false)],
            vec![entry(1, 3, 4, false, false)],
        ] {
            let err = svc.create(user_id, request(course_id, holes)).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
    }

    #[tokio::test]
    async fn test_rejects_stroke_counts_out_of_range() {
        let (svc, course_id, user_id) = setup().await;
        let mut sandy = entry(2, 4, 1, false, false);
        sandy.sand_saves = 5;
        let mut penalised = entry(2, 4, 1, false, false);
        penalised.penalties = i32::MAX;

        for holes in [
            vec![entry(1, i32::MAX, 2, false, false), entry(2, i32::MAX, 2, false, false)],
            vec![entry(1, MAX_STROKES_PER_HOLE + 1, 2, false, false)],
            vec![entry(1, 4, 2, false, false), sandy],
            vec![entry(1, 4, 2, false, false), penalised],
        ] {
            let err = svc.create(user_id, request(course_id, holes)).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }
        assert!(svc.list_for_user(user_id).await.unwrap().is_empty());

        let card = svc
            .create(
                user_id,
                request(course_id, vec![entry(1, MAX_STROKES_PER_HOLE, 3, false, false)]),
            )
            .await
            .unwrap();
        assert_eq!(card.total_score, Some(MAX_STROKES_PER_HOLE));
    }
}
