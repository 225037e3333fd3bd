//! Custom extractors

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::types::error::AppError;

/// Largest body buffered before decoding, matching axum's default body limit
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Body extractor accepting either a JSON or a URL-encoded form payload
///
/// JSON is used when the `Content-Type` is `application/json`, form decoding otherwise.
/// An empty body yields `T::default()` whatever the content type.
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(|err| {
            tracing::warn!("Failed to read request body: {err}");
            AppError::invalid_body()
        })?;

        if bytes.is_empty() {
            return Ok(Self(T::default()));
        }

        let is_json = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim_start().starts_with("application/json"));
        let req = Request::from_parts(parts, Body::from(bytes));

        if is_json {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|err| {
                    tracing::warn!("Invalid JSON body: {err}");
                    AppError::invalid_body()
                })?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|err| {
                    tracing::warn!("Invalid form body: {err}");
                    AppError::invalid_body()
                })?;
            Ok(Self(payload))
        }
    }
}
