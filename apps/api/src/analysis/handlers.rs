//! Axum route handlers for the ATS check API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::assess;
use crate::analysis::keywords::{mine_job_keywords, KeywordSet};
use crate::analysis::models::AnalysisResult;
use crate::analysis::verdict::{verdict_for, Verdict};
use crate::errors::AppError;
use crate::extraction::{DocumentFormat, ExtractionError};
use crate::state::AppState;

/// Keywords mined from a job description when the caller sends no explicit list.
pub const DEFAULT_JOB_KEYWORD_LIMIT: usize = 15;
const MAX_JOB_KEYWORD_LIMIT: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CheckResumeResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub verdict: Verdict,
    /// The keyword set the coverage rule actually tested.
    pub keywords: KeywordSet,
}

#[derive(Debug, Deserialize)]
pub struct JobKeywordsRequest {
    pub jd_text: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct JobKeywordsResponse {
    pub keywords: KeywordSet,
}

/// A parsed `multipart/form-data` résumé submission.
#[derive(Debug)]
struct ResumeUpload {
    filename: String,
    bytes: Bytes,
    keywords: Vec<String>,
    job_description: Option<String>,
}

impl ResumeUpload {
    /// Explicit keywords first, then keywords mined from the job description.
    /// Empty means the engine derives keywords from the résumé itself.
    fn target_keywords(&self) -> Vec<String> {
        if !self.keywords.is_empty() {
            return self.keywords.clone();
        }
        match self.job_description.as_deref() {
            Some(jd) if !jd.trim().is_empty() => {
                mine_job_keywords(jd, DEFAULT_JOB_KEYWORD_LIMIT).into_vec()
            }
            _ => vec![],
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/check-resume
///
/// Multipart upload: one PDF or DOCX file part (usually named `resume`), plus
/// optional `keywords` (comma or newline separated) and `job_description` fields.
pub async fn handle_check_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CheckResumeResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;

    let format = DocumentFormat::from_filename(&upload.filename)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(upload.filename.clone()))?;
    info!(
        filename = %upload.filename,
        %format,
        bytes = upload.bytes.len(),
        "Resume received"
    );

    let keywords = upload.target_keywords();
    let text = state.extractor.extract(format, upload.bytes).await?;
    info!(chars = text.chars().count(), "Text extracted");

    let assessment = tokio::task::spawn_blocking(move || assess(&text, &keywords))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let score = assessment.result.score();
    info!(score, keywords = assessment.keywords.len(), "Resume analyzed");

    Ok(Json(CheckResumeResponse {
        result: assessment.result,
        verdict: verdict_for(score),
        keywords: assessment.keywords,
    }))
}

/// POST /api/job-keywords
///
/// Mines target keywords from a job description so a client can preview them
/// and send them back with the résumé check.
pub async fn handle_job_keywords(
    Json(request): Json<JobKeywordsRequest>,
) -> Result<Json<JobKeywordsResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let limit = request
        .limit
        .unwrap_or(DEFAULT_JOB_KEYWORD_LIMIT)
        .clamp(1, MAX_JOB_KEYWORD_LIMIT);
    let keywords = mine_job_keywords(&request.jd_text, limit);

    Ok(Json(JobKeywordsResponse { keywords }))
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart parsing
// ────────────────────────────────────────────────────────────────────────────

fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Malformed upload: {}", err.body_text()))
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<ResumeUpload, AppError> {
    let mut files: Vec<(String, Bytes)> = Vec::new();
    let mut keywords = Vec::new();
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(filename) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await.map_err(upload_error)?;
            files.push((filename, bytes));
            continue;
        }

        match name.as_str() {
            "keywords" => keywords = split_keywords(&field.text().await.map_err(upload_error)?),
            "job_description" => job_description = Some(field.text().await.map_err(upload_error)?),
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    if files.len() > 1 {
        return Err(AppError::Validation(
            "Upload exactly one resume file".to_string(),
        ));
    }
    let (filename, bytes) = files
        .pop()
        .ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    Ok(ResumeUpload {
        filename,
        bytes,
        keywords,
        job_description,
    })
}

fn split_keywords(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
