use axum::{
    extract::Query,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use shared::{
    api::payloads::{LogEntry, LogParams, LogResponse},
    model::{Exercise, User},
    types::Uuid,
};
use tracing::instrument;

use crate::{db::DatabaseConnection, routes::present, AppError};

/// Returns a user's exercise log in insertion order, optionally windowed by
/// an inclusive [from, to] date range and truncated to the first `limit`
/// entries. An unknown user id yields a 200 with the JSON string
/// `"No such user!"`, matching the public API.
#[instrument(skip(conn))]
pub async fn exercise_log(
    DatabaseConnection(conn): DatabaseConnection,
    Query(params): Query<LogParams>,
) -> Result<Response, AppError> {
    let Some(user_id) = present(&params.user_id) else {
        return Err(AppError::NotFound);
    };
    let user_id = Uuid::parse(user_id)?;

    let populated = conn
        .interact(move |conn| {
            let Some(user) = User::fetch_by_id(conn, &user_id)? else {
                return Ok::<_, rusqlite::Error>(None);
            };
            let User { username, exercises, .. } = user;
            let exercises = Exercise::fetch_many(conn, &exercises)?;
            Ok(Some((username, exercises)))
        })
        .await??;

    let Some((username, exercises)) = populated else {
        return Ok(Json("No such user!").into_response());
    };

    let mut log: Vec<LogEntry> = exercises
        .into_iter()
        .map(|e| LogEntry { description: e.description, duration: e.duration, date: e.date })
        .collect();

    apply_date_window(&mut log, params.from.as_deref(), params.to.as_deref());
    apply_limit(&mut log, params.limit.as_deref());

    Ok(Json(LogResponse { username, count: log.len(), log }).into_response())
}

/// The window only applies when both bounds are given. An unparsable bound
/// is a comparison nothing satisfies, so the whole log is filtered out.
fn apply_date_window(log: &mut Vec<LogEntry>, from: Option<&str>, to: Option<&str>) {
    let (Some(from), Some(to)) = (from, to) else {
        return;
    };
    match (parse_date(from), parse_date(to)) {
        (Some(from), Some(to)) => log.retain(|entry| from <= entry.date && entry.date <= to),
        _ => log.clear(),
    }
}

/// A limit that doesn't parse as an unsigned integer performs no truncation.
fn apply_limit(log: &mut Vec<LogEntry>, limit: Option<&str>) {
    let Some(limit) = limit else {
        return;
    };
    if let Ok(limit) = limit.parse::<usize>() {
        log.truncate(limit);
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
