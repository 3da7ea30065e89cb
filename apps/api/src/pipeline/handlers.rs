//! Axum route handlers for the review and advice API.
//!
//! Every validation error (missing fields, unknown model, unsupported file)
//! is raised before the pipeline issues a provider call.

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract, DocumentKind};
use crate::pipeline::models::{
    ExtractResponse, HrAdvice, HrRequest, PipelineResponse, ResumeReview, ResumeTextRequest,
};
use crate::state::AppState;

/// A file part pulled out of a multipart form.
struct Upload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadForm {
    file: Option<Upload>,
    model_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /hr
///
/// Runs HR analysis and solution stages for a free-text question.
pub async fn handle_hr(
    State(state): State<AppState>,
    payload: Result<Json<HrRequest>, JsonRejection>,
) -> Result<Json<PipelineResponse<HrAdvice>>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let question = request.question.unwrap_or_default();
    if question.trim().is_empty() {
        return Err(AppError::Validation("question is required".to_string()));
    }
    let model = state.config.models.resolve(request.model_name.as_deref())?;

    let request_id = Uuid::new_v4();
    let result = state
        .pipeline
        .advise_hr(&question, &model)
        .instrument(tracing::info_span!("hr", %request_id))
        .await?;

    Ok(Json(PipelineResponse {
        result,
        model,
        request_id,
        generated_at: Utc::now(),
    }))
}

/// POST /resume
///
/// Multipart form with `file` (PDF, DOCX or plain text) and `model_name`.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PipelineResponse<ResumeReview>>, AppError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let form = read_upload_form(multipart).await?;

    let (Some(upload), Some(model_name)) = (form.file, form.model_name) else {
        return Err(AppError::Validation(
            "Resume file and model name are required".to_string(),
        ));
    };
    let model = state.config.models.resolve(Some(&model_name))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("resume", %request_id);

    let resume_text = extract_upload(upload).instrument(span.clone()).await?;
    let result = state
        .pipeline
        .review_resume(&resume_text, &model)
        .instrument(span)
        .await?;

    Ok(Json(PipelineResponse {
        result,
        model,
        request_id,
        generated_at: Utc::now(),
    }))
}

/// POST /resume/text
///
/// Same pipeline as `/resume` for callers that already hold the resume text.
pub async fn handle_resume_text(
    State(state): State<AppState>,
    payload: Result<Json<ResumeTextRequest>, JsonRejection>,
) -> Result<Json<PipelineResponse<ResumeReview>>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let resume_text = request.resume_text.unwrap_or_default();
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text is required".to_string()));
    }
    let model = state.config.models.resolve(request.model_name.as_deref())?;

    let request_id = Uuid::new_v4();
    let result = state
        .pipeline
        .review_resume(&resume_text, &model)
        .instrument(tracing::info_span!("resume", %request_id))
        .await?;

    Ok(Json(PipelineResponse {
        result,
        model,
        request_id,
        generated_at: Utc::now(),
    }))
}

/// POST /extract
///
/// Returns the text that `/resume` would send to the model, without calling it.
pub async fn handle_extract(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let form = read_upload_form(multipart).await?;

    let upload = form
        .file
        .ok_or_else(|| AppError::Validation("file is required".to_string()))?;
    let text = extract_upload(upload).await?;

    Ok(Json(ExtractResponse {
        characters: text.chars().count(),
        text,
    }))
}

/// GET /models
pub async fn handle_list_models(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "models": state.config.models.options() }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => form.file = Some(read_file_field(field).await?),
            Some("model_name") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid model_name field: {e}")))?;
                form.model_name = Some(value);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_file_field(field: Field<'_>) -> Result<Upload, AppError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid file field: {e}")))?;

    Ok(Upload {
        file_name,
        content_type,
        bytes,
    })
}

async fn extract_upload(upload: Upload) -> Result<String, AppError> {
    let kind = DocumentKind::detect(upload.content_type.as_deref(), upload.file_name.as_deref())?;
    info!("Extracting {kind:?} upload ({} bytes)", upload.bytes.len());
    Ok(extract(upload.bytes, kind.mime()).await?)
}
