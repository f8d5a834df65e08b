//! Text extraction: turns a stored PDF or DOCX resume into plain text.
//! Parsing is delegated to `pdf-extract` and `docx-rs`.

use std::path::Path;

use docx_rs::{DocumentChild, InsertChild, ParagraphChild, Run, RunChild};

use crate::errors::AppError;
use crate::evaluation::upload::DocumentFormat;

/// Extracts the plain text of the document at `path`.
///
/// PDF pages are concatenated in order with whatever spacing the parser emits.
/// DOCX body paragraphs are emitted in document order, each followed by `\n`.
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, AppError> {
    match format {
        DocumentFormat::Pdf => extract_pdf(path),
        DocumentFormat::Docx => extract_docx(path),
    }
}

fn extract_pdf(path: &Path) -> Result<String, AppError> {
    pdf_extract::extract_text(path)
        .map_err(|e| AppError::Extraction(format!("Failed to extract text from PDF: {e}")))
}

fn extract_docx(path: &Path) -> Result<String, AppError> {
    let data = std::fs::read(path)
        .map_err(|e| AppError::Extraction(format!("Failed to read DOCX file: {e}")))?;
    let docx = docx_rs::read_docx(&data)
        .map_err(|e| AppError::Extraction(format!("Failed to parse DOCX file: {e}")))?;

    let mut text = String::new();
    for child in &docx.document.children {
        // Tables and other block content are not part of the paragraph sequence.
        if let DocumentChild::Paragraph(para) = child {
            push_paragraph_children(&para.children, &mut text);
            text.push('\n');
        }
    }
    Ok(text)
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run_text(run, out);
                    }
                }
            }
            // Deleted revisions and markers carry no visible text.
            _ => {}
        }
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
