use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Uuid;

#[cfg(feature = "backend")]
use {
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", check("../../../../server/migrations/002-exercise/up.sql"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub duration: String,
    pub date: NaiveDate,
}

#[cfg(feature = "backend")]
impl Exercise {
    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Exercise, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt.query_row(&*values.as_params(), Exercise::from_row)?;
        Ok(exercise)
    }

    /// Populates a list of exercise references into full records, preserving
    /// the order of `ids`. References that resolve to nothing are skipped.
    pub fn fetch_many(conn: &Connection, ids: &[Uuid]) -> Result<Vec<Exercise>, rusqlite::Error> {
        let mut exercises = Vec::with_capacity(ids.len());
        for id in ids {
            let (sql, values) = Query::select()
                .columns([
                    ExerciseIden::Id,
                    ExerciseIden::UserId,
                    ExerciseIden::Description,
                    ExerciseIden::Duration,
                    ExerciseIden::Date,
                ])
                .from(ExerciseIden::Table)
                .and_where(Expr::col(ExerciseIden::Id).eq(id))
                .limit(1)
                .build_rusqlite(SqliteQueryBuilder);

            let mut stmt = conn.prepare_cached(&sql)?;
            if let Some(exercise) =
                stmt.query_row(&*values.as_params(), Exercise::from_row).optional()?
            {
                exercises.push(exercise);
            }
        }
        Ok(exercises)
    }
}
