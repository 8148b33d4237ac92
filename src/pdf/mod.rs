// src/pdf/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::PdfError;

/// Returns the `.pdf` files found directly in `dir`, sorted by file name.
///
/// The sorted order defines the batch input order, so repeated runs over
/// the same directory produce identical output.
pub fn find_pdf_files(dir: &Path) -> Result<Vec<PathBuf>, PdfError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"));
        if path.is_file() && is_pdf {
            files.push(path);
        }
    }

    files.sort();
    tracing::debug!("Found {} PDF file(s) in {}", files.len(), dir.display());

    Ok(files)
}

/// Reads a PDF file and flattens it to a single text string.
///
/// Page concatenation order is physical page order; no separator is
/// inserted between pages, and line breaks may fall mid-field, which is
/// why the downstream patterns tolerate them.
pub fn extract_text(path: &Path) -> Result<String, PdfError> {
    let bytes = fs::read(path)?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        PdfError::Extraction(format!(
            "failed to extract text from {}: {e}",
            path.display()
        ))
    })?;

    tracing::debug!(
        "Extracted {} characters of text from {}",
        text.len(),
        path.display()
    );

    Ok(text)
}
