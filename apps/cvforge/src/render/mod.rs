//! Typesetter invocation: LaTeX source in, PDF out.
//!
//! Each compile runs in its own scratch directory so auxiliary files never
//! leak into the output directory. No retries: a failed compile is reported
//! with the tail of the engine's log.

use std::path::Path;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::process::run_with_timeout;

/// Default engine command line.
pub const DEFAULT_TYPESETTER: &str = "latexmk -xelatex -interaction=nonstopmode -halt-on-error";

const SOURCE_NAME: &str = "cv.tex";
const PDF_NAME: &str = "cv.pdf";

#[derive(Debug, Clone)]
pub struct Typesetter {
    pub program: String,
    /// Arguments placed before the source file name.
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl Typesetter {
    /// Parses a whitespace-separated command line such as
    /// `latexmk -xelatex -interaction=nonstopmode`.
    pub fn from_command_line(command_line: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| AppError::Validation("Typesetter command is empty".into()))?;
        Ok(Self {
            program,
            args: parts.collect(),
            timeout,
        })
    }

    /// Compiles `tex_source` and writes the resulting PDF to `output_pdf`.
    pub async fn compile(&self, tex_source: &str, output_pdf: &Path) -> Result<(), AppError> {
        let workdir = tempfile::tempdir()?;
        let source_path = workdir.path().join(SOURCE_NAME);
        tokio::fs::write(&source_path, tex_source).await?;

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .arg(SOURCE_NAME)
            .current_dir(workdir.path());

        debug!(program = %self.program, workdir = %workdir.path().display(), "Running typesetter");
        run_with_timeout(command, &self.program, self.timeout)
            .await
            .map_err(|e| AppError::Render(e.to_string()))?;

        let produced = workdir.path().join(PDF_NAME);
        if !produced.is_file() {
            return Err(AppError::Render(format!(
                "{} finished but produced no PDF",
                self.program
            )));
        }

        if let Some(parent) = output_pdf.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = tokio::fs::copy(&produced, output_pdf).await?;
        info!(output = %output_pdf.display(), bytes, "PDF compiled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str) -> Typesetter {
        Typesetter {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_command_line_parsing() {
        let t = Typesetter::from_command_line(DEFAULT_TYPESETTER, Duration::from_secs(60)).unwrap();
        assert_eq!(t.program, "latexmk");
        assert_eq!(t.args[0], "-xelatex");

        let err = Typesetter::from_command_line("   ", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_compile_copies_pdf_to_output() {
        // `sh -c script cv.tex` binds the source name to $0.
        let typesetter = shell(r#"cp "$0" "${0%.tex}.pdf""#);
        let out = tempfile::tempdir().unwrap();
        let pdf = out.path().join("nested").join("industrial-scientist.pdf");

        typesetter.compile("\\begin{document}\\end{document}", &pdf).await.unwrap();
        let copied = std::fs::read_to_string(&pdf).unwrap();
        assert!(copied.contains("\\begin{document}"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_pdf_is_render_error() {
        let out = tempfile::tempdir().unwrap();
        let err = shell("true")
            .compile("x", &out.path().join("cv.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Render(ref m) if m.contains("produced no PDF")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_engine_failure_is_render_error() {
        let out = tempfile::tempdir().unwrap();
        let err = shell("echo '! Undefined control sequence.'; exit 1")
            .compile("x", &out.path().join("cv.pdf"))
            .await
            .unwrap_err();
        match err {
            AppError::Render(msg) => assert!(msg.contains("Undefined control sequence")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_render_error() {
        let typesetter = Typesetter {
            program: "cvforge-no-such-typesetter".to_string(),
            args: Vec::new(),
            timeout: Duration::from_secs(5),
        };
        let out = tempfile::tempdir().unwrap();
        let err = typesetter
            .compile("x", &out.path().join("cv.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
