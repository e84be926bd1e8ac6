//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::RequestId;

/// JSON body whose every rejection becomes a 400 `ApiError`.
///
/// Covers syntax errors, missing fields, wrong types and a missing
/// `Content-Type: application/json` header alike.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                reason: rejection.body_text(),
            })?;

        Ok(Self(value))
    }
}

/// Extract a request id from the path.
///
/// A segment that is not a valid id cannot match any stored document, so it
/// is reported as not found. This holds for segments that do not even
/// percent-decode to UTF-8.
pub struct PathId(pub RequestId);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = match Path::from_request_parts(parts, state).await {
            Ok(path) => path,
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Unreadable request id");
                return Err(ApiError::NotFound {
                    id: parts.uri.path().to_owned(),
                });
            }
        };

        raw.parse::<RequestId>()
            .map(Self)
            .map_err(|_| ApiError::NotFound { id: raw })
    }
}
