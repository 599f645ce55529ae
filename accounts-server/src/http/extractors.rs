//! Custom Axum extractors

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract an account id from the path.
///
/// Only plain decimal digits name a row; anything else (`abc`, `+1`, `-1`)
/// is reported as not found rather than as a bad request.
pub struct AccountId(pub i64);

impl<S> FromRequestParts<S> for AccountId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::account_not_found(""))?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::account_not_found(&raw));
        }
        let id = raw
            .parse::<i64>()
            .map_err(|_| ApiError::account_not_found(&raw))?;

        Ok(Self(id))
    }
}

/// JSON body whose parse rejections become 400 validation errors.
///
/// Failures to read the body at all (e.g. over the size limit) keep their
/// own status.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::BytesRejection(inner) => ApiError::Body {
                    status: inner.status(),
                    message: inner.body_text(),
                },
                other => ApiError::Validation(ValidationError::Malformed {
                    reason: other.body_text(),
                }),
            })?;

        Ok(Self(value))
    }
}
