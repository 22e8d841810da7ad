//! Image upload handlers.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::{delete, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedQuery;
use crate::api::AppState;
use crate::errors::{AppError, AppResult, ErrorResponse};
use crate::services::UploadedFile;
use crate::types::{Created, NoContent};

/// Multipart body of the upload endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DeleteFileQuery {
    /// Blob name or its full URI
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
}

/// Create file routes; uploads may be up to `max_upload_bytes`
pub fn file_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/delete", delete(delete_file))
}

/// Upload a png/jpg/jpeg image
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "Files",
    security(("bearer_auth" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = UploadedFile),
        (status = 400, description = "Unsupported file type", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Created<UploadedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("File field must have a filename"))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

        let uploaded = state
            .services
            .files()
            .upload(file_name, data.to_vec())
            .await?;
        return Ok(Created(uploaded));
    }

    Err(AppError::validation("Missing 'file' field"))
}

/// Delete an uploaded file
#[utoipa::path(
    delete,
    path = "/api/files/delete",
    tag = "Files",
    security(("bearer_auth" = [])),
    params(DeleteFileQuery),
    responses(
        (status = 204, description = "File deleted"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn delete_file(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<DeleteFileQuery>,
) -> AppResult<NoContent> {
    state.services.files().delete(query.file_name).await?;
    Ok(NoContent)
}
