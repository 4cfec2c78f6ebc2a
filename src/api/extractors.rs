//! Request extractors that reject with [`AppError`].

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that is deserialized and then validated.
///
/// Syntax errors, wrong field types and a missing `Content-Type` all come back
/// as `400 validation_error` in the usual error body instead of axum's
/// plain-text rejections.
///
/// ```rust,ignore
/// async fn handler(ValidatedJson(payload): ValidatedJson<ShortenRequest>) { ... }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;

        payload.validate()?;

        Ok(ValidatedJson(payload))
    }
}
