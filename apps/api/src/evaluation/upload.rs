//! Uploaded resume documents and their scoped temporary storage.

use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use tempfile::NamedTempFile;

use crate::errors::AppError;
use crate::evaluation::extract::extract_text;

/// Extensions accepted by the upload filter. `doc` passes the filter but has
/// no extractor, so it is rejected as an unsupported format.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

pub const NO_FILE_PART: &str = "No file part";
pub const NO_SELECTED_FILE: &str = "No selected file";
pub const INVALID_FILE_FORMAT: &str = "Invalid file format";

/// Document formats with a text extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

/// A validated upload, held in memory until it is evaluated.
#[derive(Debug)]
pub struct UploadedDocument {
    pub filename: String,
    pub format: DocumentFormat,
    pub data: Bytes,
}

impl UploadedDocument {
    /// Validates the declared filename and infers the document format.
    ///
    /// No temporary file exists yet, so every rejection here is free of cleanup.
    pub fn from_upload(declared_filename: &str, data: Bytes) -> Result<Self, AppError> {
        if declared_filename.is_empty() {
            return Err(AppError::Validation(NO_SELECTED_FILE.to_string()));
        }

        // The extension comes from the declared name; sanitising may strip a non-ASCII stem.
        let ext = file_extension(base_name(declared_filename))
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| AppError::Validation(INVALID_FILE_FORMAT.to_string()))?;

        let format = DocumentFormat::from_extension(&ext).ok_or(AppError::UnsupportedFormat)?;

        let filename = match secure_filename(declared_filename) {
            name if file_extension(&name).as_deref() == Some(format.extension()) => name,
            _ => format!("resume.{}", format.extension()),
        };

        Ok(Self {
            filename,
            format,
            data,
        })
    }

    /// Writes the document to a temporary file under `dir`, extracts its text,
    /// and deletes the file.
    ///
    /// Blocking: call from `spawn_blocking`. The file is removed when the
    /// handle drops, on success, on error, and while unwinding from a panic.
    pub fn extract_text_in(&self, dir: &Path) -> Result<String, AppError> {
        let mut temp = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&format!(".{}", self.format.extension()))
            .tempfile_in(dir)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create temp file: {e}")))?;

        write_all(&mut temp, &self.data)?;
        let text = extract_text(temp.path(), self.format);

        // Close explicitly so a failed unlink is reported instead of ignored.
        temp.close()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to remove temp file: {e}")))?;
        text
    }
}

fn write_all(temp: &mut NamedTempFile, data: &[u8]) -> Result<(), AppError> {
    temp.write_all(data)
        .and_then(|_| temp.flush())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write temp file: {e}")))
}

/// Lowercased extension after the last `.`, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Last path component of a client-supplied filename.
fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(name)
}

/// Reduces a client-supplied filename to a safe base name.
///
/// Keeps the last path component, maps whitespace to `_`, drops characters
/// outside `[A-Za-z0-9._-]`, and trims leading/trailing dots and underscores.
pub fn secure_filename(name: &str) -> String {
    let cleaned: String = base_name(name)
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    cleaned.trim_matches(|c: char| c == '.' || c == '_').to_string()
}
