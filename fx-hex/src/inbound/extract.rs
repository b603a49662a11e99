//! Extractors whose rejections share the API's error body.

use axum::extract::{
    FromRequest, FromRequestParts,
    rejection::{FormRejection, QueryRejection},
};

use fx_types::{AppError, DomainError};

use super::handlers::ApiError;

/// `Form` that rejects with a 400 [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct ApiForm<T>(pub T);

/// `Query` that rejects with a 400 [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError(AppError::Validation(DomainError::MalformedRequest(
            rejection.body_text(),
        )))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::Validation(DomainError::MalformedRequest(
            rejection.body_text(),
        )))
    }
}
