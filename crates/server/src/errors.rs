use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use deadpool_sqlite::HookError;
use shared::api::error::ValidationError;

/// Terminal error for every route. Each kind maps to one response shape,
/// always plain text.
pub enum AppError {
    /// Store-level schema validation failure; responds 400 with the message
    /// of the first failing field.
    Validation(ValidationError),
    /// A request no route handles, including handlers that decline because a
    /// required field is missing.
    NotFound,
    Internal { code: StatusCode, message: String },
}

impl AppError {
    pub fn new<S: Into<String>>(code: StatusCode, message: S) -> Self {
        AppError::Internal { code, message: message.into() }
    }

    pub fn validation(errors: ValidationError) -> Self {
        AppError::Validation(errors)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal { code, .. } => *code,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "{errors}"),
            AppError::NotFound => write!(f, "not found"),
            AppError::Internal { message, .. } => write!(f, "{message}"),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppError {}: {}", self.status_code(), self)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

// This enables using `?` on functions that return `Result<_, Error>` to turn
// them into `Result<_, AppError>`. That way you don't need to do that manually.
impl<E> From<E> for AppError
where
    E: Into<Box<dyn std::error::Error>>,
{
    #[track_caller]
    fn from(err: E) -> Self {
        AppError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {:?}", err.into()),
        )
    }
}

impl From<AppError> for HookError {
    fn from(err: AppError) -> Self {
        Self::Message(err.to_string())
    }
}
