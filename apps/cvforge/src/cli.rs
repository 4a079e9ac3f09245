//! Command-line surface: argument types and the human-readable report.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::extract::ExtractorKind;
use crate::generation::{OutputFormat, Variant};
use crate::verify::RunSummary;

#[derive(Debug, Parser)]
#[command(name = "cvforge", version, about = "Generate CV variants and verify they contain your career records")]
pub struct Cli {
    /// Directory holding the <category>.yaml record files [env: CV_DATA_DIR]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for rendered outputs [env: CV_OUTPUT_DIR]
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// YAML file overriding layout limits [env: CV_LAYOUT_FILE]
    #[arg(long, global = true)]
    pub layout: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render one or all variants
    Generate(GenerateArgs),
    /// Check rendered outputs against the record set
    Verify(VerifyArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Variant to render
    #[arg(long, required_unless_present = "all", conflicts_with = "all")]
    pub variant: Option<Variant>,

    /// Render every known variant
    #[arg(long)]
    pub all: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Pdf)]
    pub format: OutputFormat,

    /// Typesetter command line [env: CV_TYPESETTER]
    #[arg(long)]
    pub typesetter: Option<String>,
}

impl GenerateArgs {
    pub fn variants(&self) -> Vec<Variant> {
        match self.variant {
            Some(v) if !self.all => vec![v],
            _ => Variant::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Variant to check; repeatable. Defaults to every known variant.
    #[arg(long = "variant")]
    pub variants: Vec<String>,

    /// Which rendered output to read
    #[arg(long, value_enum, default_value_t = OutputFormat::Pdf)]
    pub format: OutputFormat,

    /// PDF text extraction backend [env: CV_EXTRACTOR]
    #[arg(long, value_enum)]
    pub extractor: Option<ExtractorKind>,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl VerifyArgs {
    pub fn variants(&self) -> Vec<String> {
        if self.variants.is_empty() {
            Variant::all_keys()
        } else {
            self.variants.clone()
        }
    }
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen port [env: PORT]
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Command-line flags take precedence over environment configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(path) = &self.layout {
            config.layout_file = Some(path.clone());
        }
        match &self.command {
            Command::Generate(args) => {
                if let Some(t) = &args.typesetter {
                    config.typesetter = t.clone();
                }
            }
            Command::Verify(args) => {
                if let Some(kind) = args.extractor {
                    config.extractor = kind;
                }
            }
            Command::Serve(args) => {
                if let Some(port) = args.port {
                    config.port = port;
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

/// Per-category breakdown for every variant, then a summary table.
pub fn render_report(summary: &RunSummary) -> String {
    let mut out = String::new();

    for verdict in &summary.verdicts {
        let _ = writeln!(out, "== {} ==", verdict.variant);
        if let Some(reason) = &verdict.extraction_error {
            let _ = writeln!(out, "  FAIL  extraction: {reason}");
        }
        for category in &verdict.categories {
            let mark = if category.passed() { "ok  " } else { "FAIL" };
            let _ = writeln!(
                out,
                "  {mark}  {:<15} {} fields checked, {} missing",
                category.category.as_str(),
                category.fields_checked,
                category.issues.len()
            );
            for issue in &category.issues {
                let _ = writeln!(out, "          - {}", issue.message);
            }
        }
        out.push('\n');
    }

    let width = summary
        .verdicts
        .iter()
        .map(|v| v.variant.len())
        .max()
        .unwrap_or(0)
        .max("Variant".len());
    let _ = writeln!(out, "{:<width$}  Result  Issues  Fields", "Variant");
    for verdict in &summary.verdicts {
        let result = if verdict.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "{:<width$}  {:<6}  {:>6}  {:>6}",
            verdict.variant,
            result,
            verdict.issue_count(),
            verdict.fields_checked()
        );
    }
    let overall = if summary.passed {
        "All variants passed"
    } else {
        "Completeness check FAILED"
    };
    let _ = writeln!(out, "\n{overall}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutLimits;
    use crate::records::fixtures::sample_records;
    use crate::verify::{check_text, VariantVerdict};

    #[test]
    fn test_cli_parses_generate_all() {
        let cli = Cli::try_parse_from(["cvforge", "generate", "--all", "--format", "ats"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.format, OutputFormat::Ats);
                assert_eq!(args.variants(), Variant::ALL.to_vec());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_rejects_unknown_variant() {
        let result = Cli::try_parse_from(["cvforge", "generate", "--variant", "software-developer"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_requires_a_selection() {
        assert!(Cli::try_parse_from(["cvforge", "generate"]).is_err());
    }

    #[test]
    fn test_verify_accepts_any_variant_and_defaults_to_all() {
        let cli = Cli::try_parse_from(["cvforge", "verify", "--variant", "software-developer"]).unwrap();
        let Command::Verify(args) = &cli.command else {
            panic!("expected verify");
        };
        assert_eq!(args.variants(), vec!["software-developer".to_string()]);

        let cli = Cli::try_parse_from(["cvforge", "verify", "--json"]).unwrap();
        let Command::Verify(args) = &cli.command else {
            panic!("expected verify");
        };
        assert_eq!(args.variants(), Variant::all_keys());
        assert!(args.json);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "cvforge",
            "verify",
            "--data-dir",
            "/tmp/data",
            "--extractor",
            "pdftotext",
        ])
        .unwrap();
        let mut config = Config::from_lookup(|_| None).unwrap();
        cli.apply_overrides(&mut config);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/data"));
        assert_eq!(config.extractor, ExtractorKind::Pdftotext);
    }

    #[test]
    fn test_report_lists_issues_and_summary() {
        let records = sample_records();
        let limits = LayoutLimits::default();
        let failing = check_text(&records, "academic-researcher", "Ada Lovelace", &limits);
        let missing = VariantVerdict::extraction_failed("industrial-scientist", "rendered output not found");
        let summary = RunSummary::from_verdicts(vec![failing, missing]);

        let report = render_report(&summary);
        assert!(report.contains("== academic-researcher =="));
        assert!(report.contains("- Missing email: ada@example.org"));
        assert!(report.contains("FAIL  extraction: rendered output not found"));
        assert!(report.contains("Completeness check FAILED"));
        assert!(report.lines().any(|l| l.starts_with("industrial-scientist") && l.contains("FAIL")));
    }
}
