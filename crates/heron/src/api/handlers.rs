//! API request handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use uuid::Uuid;

use crate::core::classifier::{batch_classify_bytes, classify_bytes};
use crate::core::config::UploadConfig;
use crate::store::StoredClassification;
use crate::types::ClassifierResult;

use super::{
    error::ApiError,
    types::{ApiState, ClassificationResponse, HealthResponse},
};

/// An uploaded file that passed validation.
struct Upload {
    filename: String,
    content: Vec<u8>,
}

/// Collect every multipart field named `field_name`, validating each file.
///
/// A file must carry a non-empty filename with an allowed extension, have content, and
/// fit within the configured size limit.
async fn read_uploads(multipart: &mut Multipart, field_name: &str, limits: &UploadConfig) -> Result<Vec<Upload>, ApiError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let filename = field.file_name().map(str::to_string).unwrap_or_default();
        if filename.is_empty() {
            return Err(ApiError::bad_request("No file or filename provided"));
        }

        if !limits.is_allowed(&filename) {
            return Err(ApiError::bad_request(format!(
                "File type not allowed. Allowed types: {}",
                limits.allowed_extensions.join(", ")
            )));
        }

        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        if content.is_empty() {
            return Err(ApiError::bad_request("Empty file provided"));
        }

        if content.len() > limits.max_file_size_bytes() {
            return Err(ApiError::bad_request(format!(
                "File too large. Maximum size is {}MB",
                limits.max_file_size_mb
            )));
        }

        uploads.push(Upload {
            filename,
            content: content.to_vec(),
        });
    }

    Ok(uploads)
}

fn store_result(state: &ApiState, filename: String, result: ClassifierResult) -> Result<ClassificationResponse, ApiError> {
    let id = state.store.save(&filename, &result).map_err(ApiError::internal)?;
    Ok(ClassificationResponse { id, filename, result })
}

/// Single-file classification.
///
/// POST /classify_file
///
/// Multipart field `file`. Responds with the document type, the deciding classifier,
/// and the id the result was stored under.
pub async fn classify_file_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<ClassificationResponse>, ApiError> {
    let uploads = read_uploads(&mut multipart, "file", &state.config.upload).await?;

    let Some(upload) = uploads.into_iter().next() else {
        return Err(ApiError::bad_request("No file or filename provided"));
    };

    let result = classify_bytes(upload.content, &upload.filename, &state.classifier).await;
    Ok(Json(store_result(&state, upload.filename, result)?))
}

/// Multi-file classification.
///
/// POST /classify_files
///
/// Multipart field `files`, repeated. Results follow upload order.
pub async fn classify_files_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<ClassificationResponse>>, ApiError> {
    let uploads = read_uploads(&mut multipart, "files", &state.config.upload).await?;

    if uploads.is_empty() {
        return Err(ApiError::bad_request("No files provided for classification"));
    }

    let filenames: Vec<String> = uploads.iter().map(|u| u.filename.clone()).collect();
    let documents = uploads.into_iter().map(|u| (u.content, u.filename)).collect();

    let results = batch_classify_bytes(
        documents,
        state.classifier.clone(),
        state.config.max_concurrent_classifications,
    )
    .await
    .map_err(ApiError::internal)?;

    let responses = filenames
        .into_iter()
        .zip(results)
        .map(|(filename, result)| store_result(&state, filename, result))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(responses))
}

/// Stored classification lookup.
///
/// GET /classifications/{id}
pub async fn get_classification_handler(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoredClassification>, ApiError> {
    state
        .store
        .get(&id)
        .map_err(ApiError::internal)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Classification {} not found", id)))
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
