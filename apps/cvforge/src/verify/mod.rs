//! Data-completeness verification: does a rendered CV contain its source records?
//!
//! Pipeline per variant: extract text → normalize → extract fields per
//! category → match → aggregate. No retries, no shared mutable state; each
//! variant is checked independently.

pub mod fields;
pub mod matcher;
pub mod normalize;
pub mod report;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use crate::extract::{extractor_for, ExtractorKind, TextExtractor};
use crate::generation::OutputFormat;
use crate::layout::LayoutLimits;
use crate::records::RecordSet;

pub use fields::{Field, MatchRule};
pub use normalize::normalize;
pub use report::{CategoryReport, Issue, RunSummary, VariantVerdict, CHECK_ORDER};

/// Checks already-extracted text for one variant.
///
/// Empty (or whitespace-only) text is an extraction failure: no field checks
/// are attempted and the variant fails.
pub fn check_text(
    records: &RecordSet,
    variant: &str,
    rendered_text: &str,
    limits: &LayoutLimits,
) -> VariantVerdict {
    if rendered_text.trim().is_empty() {
        return VariantVerdict::extraction_failed(variant, "extracted text is empty");
    }

    let rendered = normalize(rendered_text);
    let categories = CHECK_ORDER
        .iter()
        .map(|&category| {
            let mut report = CategoryReport::new(category);
            for field in fields::category_fields(category, records, variant, limits) {
                let present = matcher::is_present(&rendered, &field, limits.title_word_min_len);
                report.record(&field, present);
            }
            report
        })
        .collect();

    VariantVerdict::from_categories(variant, categories)
}

/// Extracts text from a rendered output and checks it.
///
/// A missing file or a failed extraction fails this variant only.
pub async fn verify_document(
    records: &RecordSet,
    variant: &str,
    path: &Path,
    extractor: &dyn TextExtractor,
    limits: &LayoutLimits,
) -> VariantVerdict {
    if !path.is_file() {
        warn!(path = %path.display(), "Rendered output not found");
        return VariantVerdict::extraction_failed(
            variant,
            format!("rendered output not found: {}", path.display()),
        );
    }

    let text = match extractor.extract(path).await {
        Ok(text) => text,
        Err(e) => {
            warn!(extractor = extractor.name(), "Extraction failed: {e}");
            return VariantVerdict::extraction_failed(variant, e.to_string());
        }
    };

    check_text(records, variant, &text, limits)
}

/// Where the rendered outputs live and how to read them.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub extractor: ExtractorKind,
    pub timeout: Duration,
}

impl VerifyOptions {
    pub fn document_path(&self, variant: &str) -> PathBuf {
        self.output_dir
            .join(format!("{variant}.{}", self.format.extension()))
    }
}

/// Verifies each variant in order and aggregates the run.
pub async fn verify_variants(
    records: &RecordSet,
    variants: &[String],
    options: &VerifyOptions,
    limits: &LayoutLimits,
) -> RunSummary {
    let mut verdicts = Vec::with_capacity(variants.len());

    for variant in variants {
        let path = options.document_path(variant);
        let extractor = extractor_for(&path, options.extractor, options.timeout);
        let span = info_span!("verify", variant = %variant, extractor = extractor.name());

        let verdict = verify_document(records, variant, &path, extractor.as_ref(), limits)
            .instrument(span)
            .await;

        info!(
            variant = %variant,
            passed = verdict.passed,
            issues = verdict.issue_count(),
            fields = verdict.fields_checked(),
            "Variant verified"
        );
        verdicts.push(verdict);
    }

    RunSummary::from_verdicts(verdicts)
}
