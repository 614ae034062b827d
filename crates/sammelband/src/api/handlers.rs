//! API request handlers.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Local;

use crate::core::classify::{Upload, partition_uploads};
use crate::core::io;
use crate::core::{cleanup::schedule_cleanup, staging::RequestStaging};
use crate::{SammelbandError, convert, rtf};

use super::error::ApiError;
use super::types::{ApiState, HealthResponse};

/// Combine endpoint handler.
///
/// POST /upload_images_pdfs
///
/// Accepts multipart form data with a repeatable `file` field. Parts with a
/// `jpg`/`jpeg` or `pdf` extension are combined into one merged PDF; parts
/// with any other extension are silently dropped, not rejected.
///
/// Responses:
/// - `200` with the merged PDF as `combined_output.pdf`
/// - `400` `"No file part"` when the field is absent,
///   `"No selected files"` when every part has an empty filename
/// - `500` when decoding or merging fails (the batch is all-or-nothing)
pub async fn upload_images_pdfs_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut saw_file_field = false;
    let mut uploads: Vec<Upload> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        saw_file_field = true;

        let file_name = field.file_name().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;

        // An empty file input still submits one nameless part.
        if file_name.is_empty() {
            continue;
        }
        uploads.push(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    if !saw_file_field {
        return Err(ApiError::BadRequest("No file part".to_string()));
    }
    if uploads.is_empty() {
        return Err(ApiError::BadRequest("No selected files".to_string()));
    }

    let partition = partition_uploads(uploads);
    if !partition.dropped.is_empty() {
        tracing::debug!(
            "dropping {} file(s) with unrecognized extensions",
            partition.dropped.len()
        );
    }

    // Stage kept inputs under collision-free names, then run the CPU-bound
    // conversion off the async reactor.
    let mut staging = RequestStaging::new(&state.config.upload_dir);
    let mut image_paths = Vec::with_capacity(partition.images.len());
    for upload in &partition.images {
        image_paths.push(staging.stage("jpg", &upload.bytes)?);
    }
    let mut pdf_paths = Vec::with_capacity(partition.pdfs.len());
    for upload in &partition.pdfs {
        pdf_paths.push(staging.stage("pdf", &upload.bytes)?);
    }

    let merged = tokio::task::spawn_blocking(move || convert::combine_staged(&image_paths, &pdf_paths))
        .await
        .map_err(|err| ApiError::Internal(SammelbandError::Other(err.to_string())))??;

    let response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"combined_output.pdf\"".to_string(),
            ),
        ],
        merged,
    )
        .into_response();

    // Sources are deleted only after the response body has been assembled,
    // so cleanup can never race the read side.
    schedule_cleanup(staging.into_paths());

    Ok(response)
}

/// RTF conversion endpoint handler.
///
/// POST /upload_rtf
///
/// Accepts multipart form data with exactly one `file` part, any extension.
/// Returns the converted UTF-8 text as an attachment whose name is derived
/// from the source name and the conversion timestamp; the same output is
/// written to the configured converted directory.
pub async fn upload_rtf_handler(
    State(state): State<ApiState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut saw_file_field = false;
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        saw_file_field = true;

        let file_name = field.file_name().unwrap_or("").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;

        if !file_name.is_empty() && upload.is_none() {
            upload = Some(Upload {
                file_name,
                bytes: bytes.to_vec(),
            });
        }
    }

    if !saw_file_field {
        return Err(ApiError::BadRequest("No file part".to_string()));
    }
    let Some(upload) = upload else {
        return Err(ApiError::BadRequest("No selected file".to_string()));
    };

    let mut staging = RequestStaging::new(&state.config.upload_dir);
    let staged = staging.stage("rtf", &upload.bytes)?;

    let converted_dir = state.config.converted_dir.clone();
    let original_name = upload.file_name.clone();
    let extracted = tokio::task::spawn_blocking(move || -> crate::Result<rtf::ExtractedText> {
        let bytes = io::read_file_sync(&staged)?;
        let extracted = rtf::extract_rtf(&bytes, &original_name, Local::now());
        io::write_file_sync(converted_dir.join(&extracted.file_name), extracted.content.as_bytes())?;
        Ok(extracted)
    })
    .await
    .map_err(|err| ApiError::Internal(SammelbandError::Other(err.to_string())))??;

    let response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", extracted.file_name),
            ),
        ],
        extracted.content,
    )
        .into_response();

    schedule_cleanup(staging.into_paths());

    Ok(response)
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
