use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::Uuid;
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

/// The ordered, append-only list of exercise ids a user has logged, stored
/// as a JSON array in a single TEXT column. List order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRefs(Vec<Uuid>);

impl ExerciseRefs {
    pub fn push(&mut self, id: Uuid) {
        self.0.push(id);
    }
}

impl Deref for ExerciseRefs {
    type Target = Vec<Uuid>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Uuid>> for ExerciseRefs {
    fn from(value: Vec<Uuid>) -> Self {
        Self(value)
    }
}

#[cfg(feature = "backend")]
impl ToSql for ExerciseRefs {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let json = serde_json::to_string(&self.0)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(ToSqlOutput::Owned(json.into()))
    }
}

#[cfg(feature = "backend")]
impl FromSql for ExerciseRefs {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        serde_json::from_str(value.as_str()?)
            .map(ExerciseRefs)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(feature = "backend")]
impl From<&ExerciseRefs> for sea_query::Value {
    fn from(value: &ExerciseRefs) -> Self {
        serde_json::to_string(&value.0)
            .unwrap_or_else(|_| "[]".to_owned())
            .into()
    }
}
