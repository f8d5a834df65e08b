//! Axum route handler for the resume evaluation API.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::evaluation::scoring::AnalysisResult;
use crate::evaluation::upload::{UploadedDocument, NO_FILE_PART};
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

/// POST /api/evaluate-resume
///
/// Accepts a multipart form with a `resume` file (PDF or DOCX), extracts its
/// text from a scoped temporary copy, and returns the heuristic analysis.
pub async fn handle_evaluate_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Evaluate request is not a multipart form: {e}");
        AppError::Validation(NO_FILE_PART.to_string())
    })?;

    let (declared_filename, data) = read_resume_field(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation(NO_FILE_PART.to_string()))?;

    let document = UploadedDocument::from_upload(&declared_filename, data)?;
    info!(
        "Evaluating resume '{}' ({:?}, {} bytes)",
        document.filename,
        document.format,
        document.data.len()
    );

    let upload_dir = state.config.upload_dir.clone();
    let text = tokio::task::spawn_blocking(move || document.extract_text_in(&upload_dir))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Extraction("Document parser failed while reading the file".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("Extraction task was cancelled: {e}"))
            }
        })??;

    let result = state.scorer.score(&text)?;
    info!(
        "Resume evaluated: {} chars, score {}",
        text.chars().count(),
        result.score
    );

    Ok(Json(result))
}

/// Returns the filename and bytes of the first `resume` file part, if any.
/// A `resume` field without a filename is a plain form value, not a file part.
async fn read_resume_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Bytes)>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        if let Some(filename) = field.file_name().map(str::to_string) {
            let data = field.bytes().await?;
            return Ok(Some((filename, data)));
        }
    }
    Ok(None)
}
