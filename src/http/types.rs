use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::domain::repository::StoreError;

/// Per-field messages, keyed by the JSON name of the offending field.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn field(&self, field: &str) -> Option<&[String]> { self.0.get(field).map(Vec::as_slice) }
}

#[derive(Debug)]
pub enum ApiError {
    /// 400 with field-level detail; the store is never touched.
    Validation(ValidationErrors),
    /// 404 with an empty body.
    NotFound,
    /// 500; detail is logged, not returned.
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "validation_error",
                    "message": "one or more validation errors occurred",
                    "errors": errors,
                })),
            )
                .into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Store(e) => {
                tracing::error!(error = %e, "store fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "an internal error occurred",
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self { Self::Validation(e) }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self { Self::Store(e) }
}
