//! Path parameter extractor whose rejection renders as an `AppError`.

use axum::extract::{rejection::PathRejection, FromRequestParts};

use crate::errors::AppError;

/// Drop-in for `axum::extract::Path`; a malformed segment yields a JSON 400.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
