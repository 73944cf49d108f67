//! Text extraction from source documents.
//!
//! PDF text is extracted with the `pdftotext` system binary (poppler);
//! the raw text is then split into trimmed, non-empty paragraphs.

use std::process::Command;

use crate::core::errors::PipelineError;

/// Extract raw text from PDF bytes via `pdftotext`.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, PipelineError> {
    let temp_file = std::env::temp_dir().join(format!("ragserve-{}.pdf", uuid::Uuid::new_v4()));

    std::fs::write(&temp_file, data)
        .map_err(|e| PipelineError::Extraction(format!("failed to write temp PDF: {}", e)))?;

    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg("-enc")
        .arg("UTF-8")
        .arg(&temp_file)
        .arg("-")
        .output();
    let _ = std::fs::remove_file(&temp_file);

    match output {
        Ok(output) if output.status.success() => {
            let text = String::from_utf8_lossy(&output.stdout).to_string();
            if text.trim().is_empty() {
                Err(PipelineError::Extraction(
                    "pdftotext produced no text output".to_string(),
                ))
            } else {
                Ok(text)
            }
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(PipelineError::Extraction(format!(
                "pdftotext failed: {}",
                stderr.trim()
            )))
        }
        Err(e) => Err(PipelineError::Extraction(format!(
            "pdftotext command failed: {} (is poppler installed?)",
            e
        ))),
    }
}

/// Split raw text on blank-line boundaries into trimmed paragraphs,
/// dropping empty segments and preserving source order.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}
