use std::path::Path;

use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use shared::api::Object;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{AppError, AppState};

mod new_user;
pub use new_user::*;

mod users;
pub use users::*;

mod add;
pub use add::*;

mod log;
pub use log::*;

pub fn router(state: AppState, assets_dir: &Path) -> Router {
    Router::new()
        .route(Object::NewUser.path(), post(new_user))
        .route(Object::Users.path(), get(users))
        .route(Object::Add.path(), post(add_exercise))
        .route(Object::Log.path(), get(exercise_log))
        // Static assets serve everything no route claims; anything the assets
        // don't cover either becomes the terminal not-found response
        .fallback_service(
            ServeDir::new(assets_dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(not_found.into_service()),
        )
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Required params treat an empty string the same as a missing one.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
