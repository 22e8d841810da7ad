//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::infra::storage::StorageError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("The provided credentials are invalid.")]
    InvalidCredentials,

    // Resource errors
    #[error("The {entity} with id {id} was not found.")]
    EntityNotFound { entity: &'static str, id: String },

    #[error("The Like for User id {user_id} on Recipe id {recipe_id} was not found.")]
    LikeNotFound { user_id: Uuid, recipe_id: i64 },

    #[error("The Blob {0} was not found.")]
    BlobNotFound(String),

    #[error("One {0} with similar name already exists.")]
    EntityAlreadyExists(&'static str),

    #[error("The Like for User id {user_id} on Recipe id {recipe_id} already exists.")]
    LikeAlreadyExists { user_id: Uuid, recipe_id: i64 },

    #[error("A user account is already associated with email {0}.")]
    UserAlreadyExists(String),

    // Recipe composition
    #[error("No valid ingredients provided. A recipe must include at least one valid ingredient.")]
    EmptyIngredientsList,

    #[error("No valid tags provided. A recipe must include at least one valid tag.")]
    EmptyTagsList,

    #[error("The provided file extension is not supported. Please use .png, .jpg or .jpeg files instead.")]
    InvalidImageFormat,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Storage error")]
    Storage(#[from] StorageError),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code
    #[schema(example = 404)]
    pub status_code: u16,
    /// Machine-readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human-readable message
    #[schema(example = "The Recipe with id 7 was not found.")]
    pub message: String,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::EntityNotFound { .. } | AppError::LikeNotFound { .. } => "NOT_FOUND",
            AppError::BlobNotFound(_) => "BLOB_NOT_FOUND",
            AppError::EntityAlreadyExists(_)
            | AppError::LikeAlreadyExists { .. }
            | AppError::UserAlreadyExists(_) => "CONFLICT",
            AppError::EmptyIngredientsList => "EMPTY_INGREDIENTS_LIST",
            AppError::EmptyTagsList => "EMPTY_TAGS_LIST",
            AppError::InvalidImageFormat => "INVALID_IMAGE_FORMAT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EntityNotFound { .. }
            | AppError::LikeNotFound { .. }
            | AppError::BlobNotFound(_) => StatusCode::NOT_FOUND,
            AppError::EntityAlreadyExists(_)
            | AppError::LikeAlreadyExists { .. }
            | AppError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::EmptyIngredientsList
            | AppError::EmptyTagsList
            | AppError::InvalidImageFormat
            | AppError::Validation(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "A file storage error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            status_code: status.as_u16(),
            code: self.code().to_string(),
            message: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &'static str, id: impl Display) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &'static str, id: impl Display) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(entity, id))
    }
}

/// Convenience constructors
impl AppError {
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        AppError::EntityNotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = AppError::not_found("Recipe", 42);
        assert_eq!(err.to_string(), "The Recipe with id 42 was not found.");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflicts_map_to_409() {
        assert_eq!(
            AppError::EntityAlreadyExists("Ingredient").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::UserAlreadyExists("a@b.com".into()).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_recipe_composition_errors_map_to_400() {
        assert_eq!(AppError::EmptyIngredientsList.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmptyTagsList.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidImageFormat.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = AppError::internal("connection pool exhausted");
        assert_eq!(err.user_message(), "An internal error occurred");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<i32> = None;
        let err = missing.ok_or_not_found("Tag", 3).unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound { entity: "Tag", .. }));
    }
}
