pub mod admin_service;
pub mod auth_service;
pub mod course_service;
pub mod dashboard_service;
pub mod equipment_service;
pub mod payment_service;
pub mod range_service;
pub mod scorecard_service;
pub mod staff_service;
pub mod tee_time_service;
pub mod weather_service;

pub use admin_service::*;
pub use auth_service::*;
pub use course_service::*;
pub use dashboard_service::*;
pub use equipment_service::*;
pub use payment_service::*;
pub use range_service::*;
pub use scorecard_service::*;
pub use staff_service::*;
pub use tee_time_service::*;
pub use weather_service::*;

use crate::error::AppResult;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, QuerySelect, Select};

#[derive(Debug, FromQueryResult)]
struct SumRow {
    total: Option<i64>,
}

/// `SUM(column)` over the rows `select` matches, 0 when there are none.
/// Cast to BIGINT so Postgres does not hand back NUMERIC.
pub(crate) async fn sum_cents<E, C>(db: &C, select: Select<E>, column: E::Column) -> AppResult<i64>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let total: SimpleExpr = Func::cast_as(
        Func::coalesce([Expr::col(column).sum(), Expr::val(0i64).into()]),
        Alias::new("BIGINT"),
    )
    .into();

    let row = select
        .select_only()
        .column_as(total, "total")
        .into_model::<SumRow>()
        .one(db)
        .await?;
    Ok(row.and_then(|r| r.total).unwrap_or(0))
}
