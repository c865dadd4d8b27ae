//! Resume intake: multipart decoding and text extraction.
//!
//! Binary formats stop here: the matching core only ever sees UTF-8 text.

use std::path::Path;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

pub const FIELD_RESUME: &str = "resume";
pub const FIELD_JOB_DESCRIPTION: &str = "jobDescription";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    PlainText,
    Pdf,
}

impl ResumeFormat {
    /// Content type wins; the file extension is only consulted when the
    /// client sent no type or a generic `application/octet-stream`.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        let mime = content_type.map(|ct| {
            ct.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        });

        match mime.as_deref() {
            Some("text/plain") => return Some(ResumeFormat::PlainText),
            Some("application/pdf") => return Some(ResumeFormat::Pdf),
            Some("application/octet-stream") | Some("") | None => {}
            Some(_) => return None,
        }

        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt") => Some(ResumeFormat::PlainText),
            Some("pdf") => Some(ResumeFormat::Pdf),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct UploadForm {
    pub resume: ResumeUpload,
    pub job_description: String,
}

/// Reads the `resume` file and `jobDescription` text fields. Unknown fields
/// are ignored.
pub async fn read_upload_form(
    mut multipart: Multipart,
    max_resume_bytes: usize,
) -> Result<UploadForm, AppError> {
    let mut resume: Option<ResumeUpload> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_RESUME => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume: {e}")))?;
                resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            FIELD_JOB_DESCRIPTION => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job description: {e}"))
                })?;
                job_description = Some(text);
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    let resume = resume.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Job description is required".to_string()))?;

    if resume.bytes.len() > max_resume_bytes {
        return Err(AppError::Validation(format!(
            "Resume file must be at most {max_resume_bytes} bytes"
        )));
    }

    Ok(UploadForm {
        resume,
        job_description,
    })
}

/// Decodes an uploaded resume into plain text.
///
/// PDF extraction is CPU-bound and can panic on malformed input, so it runs
/// in `spawn_blocking`; a failed or panicked extraction is a 422.
pub async fn extract_resume_text(upload: &ResumeUpload) -> Result<String, AppError> {
    let format = ResumeFormat::detect(upload.content_type.as_deref(), upload.file_name.as_deref())
        .ok_or_else(|| {
            AppError::UnsupportedFormat(
                "Only plain text (.txt) and PDF resumes are supported".to_string(),
            )
        })?;

    let text = match format {
        ResumeFormat::PlainText => String::from_utf8_lossy(&upload.bytes).into_owned(),
        ResumeFormat::Pdf => extract_pdf_text(upload.bytes.clone()).await?,
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from the uploaded file".to_string(),
        ));
    }

    Ok(text)
}

async fn extract_pdf_text(bytes: Bytes) -> Result<String, AppError> {
    let unreadable = || AppError::UnprocessableEntity("Could not read the uploaded PDF".to_string());

    match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            Err(unreadable())
        }
        Err(e) => {
            warn!("PDF extraction aborted: {e}");
            Err(unreadable())
        }
    }
}
