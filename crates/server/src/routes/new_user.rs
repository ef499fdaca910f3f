use axum::Json;
use shared::{
    api::payloads::{NewUserPayload, NewUserResponse},
    model::User,
};
use tracing::instrument;

use crate::{db::DatabaseConnection, routes::present, AppError, FormOrJson};

/// Create-or-fetch: posting an existing username returns the existing record
/// rather than erroring or duplicating it.
#[instrument(skip(conn))]
pub async fn new_user(
    DatabaseConnection(conn): DatabaseConnection,
    FormOrJson(payload): FormOrJson<NewUserPayload>,
) -> Result<Json<NewUserResponse>, AppError> {
    let Some(username) = present(&payload.username).map(str::to_owned) else {
        return Err(AppError::NotFound);
    };

    let user = conn
        .interact(move |conn| User::find_or_create(conn, &username))
        .await??;

    Ok(Json(NewUserResponse { username: user.username, id: user.id }))
}
