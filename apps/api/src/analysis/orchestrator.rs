//! Resume analysis — orchestrates a single analysis request.
//!
//! Flow: validate → extract resume text → build prompt → LLM generate → return text.
//!
//! Validation runs before any extraction or network call. Nothing is kept
//! between requests.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::extraction::{DocumentExtractor, ExtractedText, UploadedDocument};
use crate::llm_client::GenerationClient;

pub const MISSING_RESUME_MESSAGE: &str = "Please upload a PDF resume file.";
pub const MISSING_JOB_DESCRIPTION_MESSAGE: &str = "Please provide a Job Description.";
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Only PDF resumes are supported.";

/// One user submission.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub resume: Option<UploadedDocument>,
}

/// The model's answer, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub analysis: String,
}

/// Wires the extractor and generation client together. Cheap to clone.
#[derive(Clone)]
pub struct Analyzer {
    extractor: Arc<dyn DocumentExtractor>,
    generator: Arc<dyn GenerationClient>,
}

impl Analyzer {
    pub fn new(extractor: Arc<dyn DocumentExtractor>, generator: Arc<dyn GenerationClient>) -> Self {
        Self {
            extractor,
            generator,
        }
    }

    /// Runs the full analysis pipeline for one submission.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AppError> {
        let resume = validate(&request)?;
        let request_id = Uuid::new_v4();

        async move {
            let extracted = self.extract(resume).await?;
            info!(
                "Resume text extracted: {} page(s), {} chars",
                extracted.page_count,
                extracted.text.len()
            );

            let prompt = build_analysis_prompt(&extracted.text, &request.job_description);
            info!("Prompt built: {} chars", prompt.len());

            let started = Instant::now();
            let analysis = self.generator.generate(&prompt).await?;
            info!(
                "Analysis generated in {}ms: {} chars",
                started.elapsed().as_millis(),
                analysis.len()
            );

            Ok::<_, AppError>(AnalysisResult { analysis })
        }
        .instrument(info_span!("analysis", %request_id))
        .await
    }

    /// Runs the extractor on the blocking pool.
    async fn extract(&self, resume: UploadedDocument) -> Result<ExtractedText, AppError> {
        let extractor = Arc::clone(&self.extractor);
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&resume))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {e}")))??;
        Ok(extracted)
    }
}

/// Checks the submission before any work is done, in the order the form shows errors.
fn validate(request: &AnalysisRequest) -> Result<UploadedDocument, AppError> {
    let resume = match &request.resume {
        Some(resume) if !resume.is_blank() => resume,
        _ => return Err(AppError::Validation(MISSING_RESUME_MESSAGE.to_string())),
    };

    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            MISSING_JOB_DESCRIPTION_MESSAGE.to_string(),
        ));
    }

    if !resume.is_supported_format() {
        return Err(AppError::Validation(UNSUPPORTED_FORMAT_MESSAGE.to_string()));
    }

    Ok(resume.clone())
}
