use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::error::{FieldError, ValidationError},
    types::Uuid,
};
#[cfg(feature = "backend")]
use {
    crate::model::{Exercise, User},
    anyhow::anyhow,
    exemplar::Model,
    rusqlite::Connection,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct NewExercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub duration: String,
    pub date: NaiveDate,
}

impl NewExercise {
    /// Builds a new exercise, validating it the way the store schema would.
    /// A missing date defaults to today's UTC date.
    pub fn new(
        user_id: Uuid,
        description: String,
        duration: String,
        date: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        if description.is_empty() {
            errors.push(FieldError::new("description", "description is required"));
        }
        if duration.is_empty() {
            errors.push(FieldError::new("duration", "duration is required"));
        }

        let date = match date {
            Some(value) => NaiveDate::parse_from_str(&value, DATE_FORMAT).unwrap_or_else(|_| {
                errors.push(FieldError::new(
                    "date",
                    format!("Cast to date failed for value \"{value}\""),
                ));
                Default::default()
            }),
            None => Utc::now().date_naive(),
        };

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        Ok(Self { id: Uuid::new_v4(), user_id, description, duration, date })
    }
}

#[cfg(feature = "backend")]
impl NewExercise {
    /// Persists the exercise and appends its id to the owning user's
    /// exercise list, in a single transaction. Returns None when no user
    /// matches `user_id`.
    pub fn create(self, conn: &mut Connection) -> Result<Option<(User, Exercise)>, anyhow::Error> {
        let tx = conn.transaction()?;

        let Some(mut user) = User::fetch_by_id(&tx, &self.user_id)? else {
            return Ok(None);
        };

        let id = self.id;
        let exercise = {
            self.insert(&tx)?;
            Exercise::fetch_by_id(&tx, &id)
                .map_err(|e| anyhow!("fetching exercise {id} after insert: {e}"))?
        };

        user.exercises.push(exercise.id);
        user.update(&tx)?;

        tx.commit()?;

        Ok(Some((user, exercise)))
    }
}
