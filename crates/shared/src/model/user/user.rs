use serde::{Deserialize, Serialize};

use crate::types::{ExerciseRefs, Uuid};

#[cfg(feature = "backend")]
use {
    crate::model::NewUser,
    anyhow::anyhow,
    exemplar::{Model, OnConflict},
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
#[cfg_attr(feature = "backend", check("../../../../server/migrations/001-user/up.sql"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub exercises: ExerciseRefs,
}

#[cfg(feature = "backend")]
impl User {
    pub fn fetch_by_id(conn: &Connection, id: &Uuid) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([UserIden::Id, UserIden::Username, UserIden::Exercises])
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row).optional()?;
        Ok(user)
    }

    pub fn fetch_by_username<T: AsRef<str>>(
        conn: &Connection,
        username: T,
    ) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([UserIden::Id, UserIden::Username, UserIden::Exercises])
            .from(UserIden::Table)
            .and_where(Expr::col(UserIden::Username).eq(username.as_ref()))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row).optional()?;
        Ok(user)
    }

    pub fn fetch_all(conn: &Connection) -> Result<Vec<User>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([UserIden::Id, UserIden::Username, UserIden::Exercises])
            .from(UserIden::Table)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(users)
    }

    /// Returns the existing user with this username or creates one. The
    /// username column carries a unique index, so the conflict-handling
    /// insert makes this safe against a concurrent identical request.
    pub fn find_or_create(conn: &mut Connection, username: &str) -> Result<User, anyhow::Error> {
        let tx = conn.transaction()?;
        let user = match User::fetch_by_username(&tx, username)? {
            Some(user) => user,
            None => {
                NewUser::new(username).insert_or(&tx, OnConflict::Ignore)?;
                User::fetch_by_username(&tx, username)?
                    .ok_or_else(|| anyhow!("user {username} missing after insert"))?
            }
        };
        tx.commit()?;

        Ok(user)
    }

    pub fn update(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        let (sql, values) = Query::update()
            .table(UserIden::Table)
            .values([
                (UserIden::Username, self.username.clone().into()),
                (UserIden::Exercises, (&self.exercises).into()),
            ])
            .and_where(Expr::col(UserIden::Id).eq(&self.id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }
}
