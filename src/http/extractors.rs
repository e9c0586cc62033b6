//! Extractors that reject with the service's own responses instead of axum's defaults.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use super::types::{ApiError, ValidationErrors};
use crate::domain::todo::TodoId;

/// JSON body whose rejections become 400 validation errors on the `body` field.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    tracing::debug!(%rejection, "rejected request body");
    ApiError::Validation(ValidationErrors::single("body", rejection.body_text()))
}

/// `{id}` path segment. Anything but a plain non-negative integer does not match the route.
pub struct TodoIdPath(pub TodoId);

#[async_trait]
impl<S> FromRequestParts<S> for TodoIdPath
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;
        parse_id(&raw).map(Self).ok_or(StatusCode::NOT_FOUND)
    }
}

fn parse_id(raw: &str) -> Option<TodoId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok().map(TodoId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_integers() {
        assert_eq!(parse_id("0"), Some(TodoId(0)));
        assert_eq!(parse_id("42"), Some(TodoId(42)));
        assert_eq!(parse_id("007"), Some(TodoId(7)));
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "-1", "+1", "1.5", "abc", " 1", "99999999999999999999"] {
            assert_eq!(parse_id(raw), None, "{raw:?}");
        }
    }
}
