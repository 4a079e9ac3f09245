use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;

use crate::extract::ExtractorKind;
use crate::render::DEFAULT_TYPESETTER;

/// Application configuration loaded from environment variables.
/// Every variable has a default; command-line flags override these values.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Typesetter command line, e.g. `latexmk -xelatex`.
    pub typesetter: String,
    pub extractor: ExtractorKind,
    /// Applies to every child process (typesetter, pdftotext).
    pub render_timeout: Duration,
    /// Optional YAML file overriding `LayoutLimits` defaults.
    pub layout_file: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let extractor = ExtractorKind::from_str(&get("CV_EXTRACTOR", "builtin"), true)
            .map_err(|e| anyhow!(e))
            .context("CV_EXTRACTOR must be 'builtin' or 'pdftotext'")?;

        let timeout_secs = get("CV_RENDER_TIMEOUT_SECS", "120")
            .parse::<u64>()
            .context("CV_RENDER_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            data_dir: PathBuf::from(get("CV_DATA_DIR", "data")),
            output_dir: PathBuf::from(get("CV_OUTPUT_DIR", "output")),
            typesetter: get("CV_TYPESETTER", DEFAULT_TYPESETTER),
            extractor,
            render_timeout: Duration::from_secs(timeout_secs),
            layout_file: lookup("CV_LAYOUT_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            port: get("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG", "info"),
        })
    }
}
