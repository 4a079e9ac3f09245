//! Report aggregation: per-category issues → per-variant verdict → run summary.
//!
//! Pure data. Printing lives with the CLI.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::records::Category;
use crate::verify::fields::Field;

/// Category check order for every variant.
pub const CHECK_ORDER: [Category; 6] = [
    Category::Personal,
    Category::Experience,
    Category::Education,
    Category::Strengths,
    Category::Skills,
    Category::Certifications,
];

/// A field that was not found in the rendered text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub category: Category,
    pub field: String,
    pub message: String,
}

impl Issue {
    pub fn missing(field: &Field) -> Self {
        Self {
            category: field.category,
            field: field.identifier.clone(),
            message: field.issue_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub fields_checked: usize,
    pub issues: Vec<Issue>,
}

impl CategoryReport {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            fields_checked: 0,
            issues: Vec::new(),
        }
    }

    pub fn record(&mut self, field: &Field, present: bool) {
        self.fields_checked += 1;
        if !present {
            self.issues.push(Issue::missing(field));
        }
    }

    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Terminal result for one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantVerdict {
    pub variant: String,
    pub passed: bool,
    /// Set when the rendered output was missing or yielded no text.
    /// No field checks run in that case.
    pub extraction_error: Option<String>,
    pub categories: Vec<CategoryReport>,
}

impl VariantVerdict {
    /// Passes iff no category reported an issue.
    pub fn from_categories(variant: &str, categories: Vec<CategoryReport>) -> Self {
        let passed = categories.iter().all(CategoryReport::passed);
        Self {
            variant: variant.to_string(),
            passed,
            extraction_error: None,
            categories,
        }
    }

    pub fn extraction_failed(variant: &str, reason: impl Into<String>) -> Self {
        Self {
            variant: variant.to_string(),
            passed: false,
            extraction_error: Some(reason.into()),
            categories: Vec::new(),
        }
    }

    /// All issues, in check order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.categories.iter().flat_map(|c| c.issues.iter())
    }

    pub fn issue_count(&self) -> usize {
        self.categories.iter().map(|c| c.issues.len()).sum()
    }

    pub fn fields_checked(&self) -> usize {
        self.categories.iter().map(|c| c.fields_checked).sum()
    }
}

/// Verdicts for every requested variant.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub passed: bool,
    pub verdicts: Vec<VariantVerdict>,
}

impl RunSummary {
    /// The run passes iff every variant passed. An empty run passes.
    pub fn from_verdicts(verdicts: Vec<VariantVerdict>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            passed: verdicts.iter().all(|v| v.passed),
            verdicts,
        }
    }

    /// Process exit status: 0 if all variants passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}
