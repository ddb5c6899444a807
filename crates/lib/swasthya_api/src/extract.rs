//! JSON body extraction with validation.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// `Json<T>` that also runs the body through its `validator` rules, turning
/// both undeserializable bodies and rule violations into a 400 with a
/// structured issue list (axum's stock `Json` rejection would be a 422).
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_input("body", rejection.body_text()))?;
        body.validate()?;
        Ok(Self(body))
    }
}
