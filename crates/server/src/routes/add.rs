use axum::{
    response::{IntoResponse, Response},
    Json,
};
use shared::{
    api::payloads::{AddExercisePayload, AddExerciseResponse},
    model::{NewExercise, User},
    types::Uuid,
};
use tracing::instrument;

use crate::{db::DatabaseConnection, routes::present, AppError, FormOrJson};

/// Logs an exercise against a user. An unknown (but well-formed) user id is
/// reported as a 200 with the body `No such user`, matching the public API.
#[instrument(skip(conn))]
pub async fn add_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    FormOrJson(payload): FormOrJson<AddExercisePayload>,
) -> Result<Response, AppError> {
    let (Some(user_id), Some(description), Some(duration)) = (
        present(&payload.user_id),
        present(&payload.description),
        present(&payload.duration),
    ) else {
        return Err(AppError::NotFound);
    };

    // A user id that isn't a uuid at all fails the same way the store's
    // id cast would: as an internal error
    let user_id = Uuid::parse(user_id)?;

    // The user is resolved before the date cast; an unknown user wins over
    // a bad date
    let known = conn
        .interact(move |conn| User::fetch_by_id(conn, &user_id))
        .await??
        .is_some();
    if !known {
        return Ok("No such user".into_response());
    }

    let new_exercise = NewExercise::new(
        user_id,
        description.to_owned(),
        duration.to_owned(),
        present(&payload.date).map(str::to_owned),
    )
    .map_err(AppError::validation)?;

    let created = conn.interact(move |conn| new_exercise.create(conn)).await??;

    let Some((user, exercise)) = created else {
        return Ok("No such user".into_response());
    };

    Ok(Json(AddExerciseResponse {
        user: user.username,
        description: exercise.description,
        duration: exercise.duration,
        date: exercise.date,
    })
    .into_response())
}
