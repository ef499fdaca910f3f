use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::AppError;

/// Body extractor accepting either a urlencoded form or JSON, switching on
/// the Content-Type header.
#[derive(Debug)]
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with(mime::APPLICATION_JSON.as_ref()) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;
            Ok(FormOrJson(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| body_rejection(e.status(), e.body_text()))?;
            Ok(FormOrJson(value))
        }
    }
}

// A body no parser claims behaves like an unhandled request; anything else
// keeps the status the rejection carries.
fn body_rejection(code: StatusCode, message: String) -> AppError {
    if code == StatusCode::UNSUPPORTED_MEDIA_TYPE {
        AppError::NotFound
    } else {
        AppError::Internal { code, message }
    }
}
