//! Request extraction that reports failures in the `AppError` envelope.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use bloglist_core::error::CoreError;
use bloglist_core::validation::validation_message;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and passed its [`Validate`] rules.
///
/// Malformed bodies become 400 `BAD_REQUEST`; rule violations become 400
/// `VALIDATION_ERROR` carrying the rule messages.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateBlogRequest>) -> AppResult<Json<Blog>> {
///     // every #[validate] rule on CreateBlogRequest holds here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| CoreError::Validation(validation_message(&errors)))?;

        Ok(Self(value))
    }
}

/// Path parameters whose parse failures become 400 `BAD_REQUEST` JSON
/// instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}
