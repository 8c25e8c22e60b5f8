//! Axum route handlers for the Analysis API.

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};

use crate::analysis::orchestrator::{AnalysisRequest, AnalysisResult};
use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::state::AppState;

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const RESUME_FIELD: &str = "resume";

/// POST /api/v1/analyze
///
/// `multipart/form-data` with a `job_description` text field and one `resume`
/// file. Returns the model's analysis verbatim.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request = read_analysis_form(multipart).await?;
    let result = state.analyzer.analyze(request).await?;
    Ok(Json(result))
}

/// Collects the form fields into an `AnalysisRequest`. Unknown fields are skipped.
async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut job_description: Option<String> = None;
    let mut resume: Option<UploadedDocument> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field.text().await.map_err(malformed)?;
                if job_description.is_some() {
                    return Err(AppError::Validation(
                        "Please provide exactly one Job Description.".to_string(),
                    ));
                }
                job_description = Some(text);
            }
            Some(RESUME_FIELD) => {
                let upload = read_upload(field).await?;
                if upload.is_blank() {
                    continue;
                }
                if resume.is_some() {
                    return Err(AppError::Validation(
                        "Please upload exactly one resume file.".to_string(),
                    ));
                }
                resume = Some(upload);
            }
            other => {
                tracing::debug!("Ignoring unknown form field {:?}", other);
            }
        }
    }

    Ok(AnalysisRequest {
        job_description: job_description.unwrap_or_default(),
        resume,
    })
}

async fn read_upload(field: Field<'_>) -> Result<UploadedDocument, AppError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(malformed)?;
    Ok(UploadedDocument::new(file_name, content_type, bytes))
}

// The body limit surfaces as a multipart read error carrying 413.
fn malformed(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(err.body_text());
    }
    AppError::Validation(format!("Malformed upload: {}", err.body_text()))
}
