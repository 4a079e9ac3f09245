// Document generation: record set + variant → LaTeX, PDF or ATS text.
// Renderers are pure; only `generate_variant` touches the filesystem or the typesetter.

pub mod ats;
pub mod escape;
pub mod latex;
pub mod templates;
pub mod variant;

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::LayoutLimits;
use crate::records::RecordSet;
use crate::render::Typesetter;

pub use ats::render_ats;
pub use escape::escape_latex;
pub use latex::render_latex;
pub use variant::{Variant, VariantProfile};

/// Output produced for a variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `.tex` source only.
    Latex,
    /// Typeset `.pdf` (the `.tex` source is kept beside it).
    #[default]
    Pdf,
    /// Plain-text `.txt` for applicant tracking systems.
    Ats,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Latex => "tex",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Ats => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Latex => "latex",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Ats => "ats",
        })
    }
}

/// Renders the textual source for a format. PDF output renders its LaTeX source.
pub fn render_source(
    records: &RecordSet,
    variant: Variant,
    format: OutputFormat,
    limits: &LayoutLimits,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Latex | OutputFormat::Pdf => render_latex(records, variant, limits),
        OutputFormat::Ats => render_ats(records, variant, limits),
    }
}

/// Summary of one written output file.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub variant: Variant,
    pub format: OutputFormat,
    pub path: PathBuf,
    pub lines: usize,
    pub bytes: usize,
}

/// Writes `contents` to `path`, creating parent directories.
pub async fn write_document(path: &Path, contents: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}

/// Renders one variant into `output_dir/<variant>.<ext>`.
///
/// PDF output also leaves `<variant>.tex` in the output directory.
pub async fn generate_variant(
    records: &RecordSet,
    variant: Variant,
    format: OutputFormat,
    output_dir: &Path,
    limits: &LayoutLimits,
    typesetter: &Typesetter,
) -> Result<GeneratedDocument, AppError> {
    let source = render_source(records, variant, format, limits)?;
    let lines = source.matches('\n').count();
    let bytes = source.len();

    let path = output_dir.join(format!("{}.{}", variant.key(), format.extension()));
    match format {
        OutputFormat::Latex | OutputFormat::Ats => write_document(&path, &source).await?,
        OutputFormat::Pdf => {
            let tex_path = output_dir.join(format!("{}.tex", variant.key()));
            write_document(&tex_path, &source).await?;
            typesetter.compile(&source, &path).await?;
        }
    }

    info!(
        variant = %variant,
        format = %format,
        path = %path.display(),
        lines,
        bytes,
        "Generated document"
    );

    Ok(GeneratedDocument {
        variant,
        format,
        path,
        lines,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::fixtures::sample_records;
    use std::time::Duration;

    fn typesetter() -> Typesetter {
        Typesetter {
            program: "cvforge-no-such-typesetter".to_string(),
            args: Vec::new(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Latex.extension(), "tex");
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
        assert_eq!(OutputFormat::Ats.extension(), "txt");
        assert_eq!(OutputFormat::Ats.to_string(), "ats");
    }

    #[tokio::test]
    async fn test_generate_ats_writes_txt() {
        let dir = tempfile::tempdir().unwrap();
        let doc = generate_variant(
            &sample_records(),
            Variant::AcademicResearcher,
            OutputFormat::Ats,
            dir.path(),
            &LayoutLimits::default(),
            &typesetter(),
        )
        .await
        .unwrap();

        assert_eq!(doc.path, dir.path().join("academic-researcher.txt"));
        let written = std::fs::read_to_string(&doc.path).unwrap();
        assert_eq!(written.len(), doc.bytes);
        assert!(written.starts_with("ADA LOVELACE\n"));
    }

    #[tokio::test]
    async fn test_generate_pdf_keeps_tex_when_typesetter_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_variant(
            &sample_records(),
            Variant::IndustrialScientist,
            OutputFormat::Pdf,
            dir.path(),
            &LayoutLimits::default(),
            &typesetter(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Render(_)));
        assert!(dir.path().join("industrial-scientist.tex").is_file());
        assert!(!dir.path().join("industrial-scientist.pdf").exists());
    }
}
