use axum::Json;
use shared::{
    api::payloads::{UserSummary, UsersResponse},
    model::User,
};
use tracing::instrument;

use crate::{db::DatabaseConnection, AppError};

/// Lists every user, projected to id and username only; the exercise list is
/// never part of this response.
#[instrument(skip(conn))]
pub async fn users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<UsersResponse>, AppError> {
    let users = conn.interact(|conn| User::fetch_all(conn)).await??;

    let users = users
        .into_iter()
        .map(|user| UserSummary { id: user.id, username: user.username })
        .collect();

    Ok(Json(UsersResponse { users }))
}
