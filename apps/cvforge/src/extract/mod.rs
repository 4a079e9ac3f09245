//! Text extraction: turns a rendered document back into raw text.
//!
//! Pluggable via `TextExtractor`, selected at startup by `ExtractorKind`.
//! Plain-text (ATS) outputs are always read verbatim.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::errors::AppError;
use crate::process::run_with_timeout;

/// Extractor trait. Implementations return raw text; emptiness is judged by
/// the caller, not here.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn extract(&self, path: &Path) -> Result<String, AppError>;
}

/// Configured backend for PDF outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// In-process extraction with `pdf-extract`.
    #[default]
    Builtin,
    /// Poppler's `pdftotext <file> -`.
    Pdftotext,
}

fn extraction_error(path: &Path, reason: impl Into<String>) -> AppError {
    AppError::Extraction {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backends
// ────────────────────────────────────────────────────────────────────────────

/// In-process PDF text extraction. CPU-bound, so it runs on the blocking pool.
pub struct PdfExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    async fn extract(&self, path: &Path) -> Result<String, AppError> {
        let owned = path.to_path_buf();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| extraction_error(path, format!("pdf-extract task failed: {e}")))?
            .map_err(|e| extraction_error(path, e.to_string()))?;

        debug!(path = %path.display(), chars = text.len(), "Extracted text with pdf-extract");
        Ok(text)
    }
}

/// External `pdftotext` invocation with a timeout.
pub struct PdftotextExtractor {
    pub program: String,
    pub timeout: Duration,
}

impl PdftotextExtractor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "pdftotext".to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl TextExtractor for PdftotextExtractor {
    fn name(&self) -> &'static str {
        "pdftotext"
    }

    async fn extract(&self, path: &Path) -> Result<String, AppError> {
        let mut command = Command::new(&self.program);
        command.arg(path).arg("-");

        let output = run_with_timeout(command, &self.program, self.timeout)
            .await
            .map_err(|e| extraction_error(path, e.to_string()))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reads a text file as-is. Used for ATS outputs.
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    async fn extract(&self, path: &Path) -> Result<String, AppError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| extraction_error(path, e.to_string()))
    }
}

/// Picks the extractor for a rendered output. `.txt` files bypass PDF backends.
pub fn extractor_for(path: &Path, kind: ExtractorKind, timeout: Duration) -> Box<dyn TextExtractor> {
    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    if is_text {
        return Box::new(PlainTextExtractor);
    }
    match kind {
        ExtractorKind::Builtin => Box::new(PdfExtractor),
        ExtractorKind::Pdftotext => Box::new(PdftotextExtractor::new(timeout)),
    }
}
