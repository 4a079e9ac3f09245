//! Field extraction: which source values a rendered variant must contain.
//!
//! Truncation here mirrors the renderers via the shared `LayoutLimits` table.
//! A field the renderer intentionally omits must never be extracted.

use serde::Serialize;

use crate::layout::LayoutLimits;
use crate::records::{Category, RecordSet};
use crate::verify::matcher::leading_chars;
use crate::verify::normalize::normalize;

/// Characters of an achievement echoed back in its issue message.
const ACHIEVEMENT_DISPLAY_CHARS: usize = 50;

/// How a field's expected text is located in the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "chars")]
pub enum MatchRule {
    Exact,
    /// Exact, else all significant words present in any order.
    Title,
    /// Only the leading N characters must appear.
    Prefix(usize),
}

/// A single checkable value derived from the record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub category: Category,
    /// Stable location of the value, e.g. `experience[0].title`.
    pub identifier: String,
    /// Human label, e.g. "job title".
    pub label: String,
    /// Source text shown in the issue message.
    pub display: String,
    /// Normalized expected text.
    pub expected: String,
    pub rule: MatchRule,
}

impl Field {
    fn new(category: Category, identifier: String, label: impl Into<String>, source: &str) -> Self {
        Self {
            category,
            identifier,
            label: label.into(),
            display: source.to_string(),
            expected: normalize(source),
            rule: MatchRule::Exact,
        }
    }

    fn with_rule(mut self, rule: MatchRule) -> Self {
        self.rule = rule;
        self
    }

    fn with_display(mut self, display: String) -> Self {
        self.display = display;
        self
    }

    pub fn issue_message(&self) -> String {
        format!("Missing {}: {}", self.label, self.display)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-category extractors
// ────────────────────────────────────────────────────────────────────────────

/// Full name, email, and the variant's tagline (skipped when absent).
pub fn personal_fields(records: &RecordSet, variant: &str) -> Vec<Field> {
    let personal = &records.personal;
    let mut fields = vec![
        Field::new(
            Category::Personal,
            "personal.name".to_string(),
            "name",
            &personal.full_name(),
        ),
        Field::new(
            Category::Personal,
            "personal.email".to_string(),
            "email",
            &personal.email,
        ),
    ];

    if let Some(tagline) = personal.tagline(variant) {
        fields.push(Field::new(
            Category::Personal,
            format!("personal.taglines.{variant}"),
            "tagline",
            tagline,
        ));
    }
    fields
}

/// Title, company, and first-achievement prefix for the first N jobs.
pub fn experience_fields(records: &RecordSet, limits: &LayoutLimits) -> Vec<Field> {
    let mut fields = Vec::new();
    for (idx, job) in records.experience.iter().take(limits.experience).enumerate() {
        fields.push(Field::new(
            Category::Experience,
            format!("experience[{idx}].title"),
            "job title",
            &job.title,
        ));
        fields.push(Field::new(
            Category::Experience,
            format!("experience[{idx}].company"),
            "company",
            &job.company,
        ));

        if let Some(first) = job.achievements.first() {
            let display = format!("{}...", leading_chars(first, ACHIEVEMENT_DISPLAY_CHARS));
            fields.push(
                Field::new(
                    Category::Experience,
                    format!("experience[{idx}].achievements[0]"),
                    format!("achievement from {}", job.company),
                    first,
                )
                .with_rule(MatchRule::Prefix(limits.achievement_prefix_chars))
                .with_display(display),
            );
        }
    }
    fields
}

/// Every degree and institution. Education is never truncated.
pub fn education_fields(records: &RecordSet) -> Vec<Field> {
    records
        .education
        .iter()
        .enumerate()
        .flat_map(|(idx, edu)| {
            [
                Field::new(
                    Category::Education,
                    format!("education[{idx}].degree"),
                    "degree",
                    &edu.degree,
                ),
                Field::new(
                    Category::Education,
                    format!("education[{idx}].institution"),
                    "institution",
                    &edu.institution,
                ),
            ]
        })
        .collect()
}

/// Title (with word fallback) and description prefix for the first N strengths.
pub fn strength_fields(records: &RecordSet, limits: &LayoutLimits) -> Vec<Field> {
    let mut fields = Vec::new();
    for (idx, strength) in records.strengths.iter().take(limits.strengths).enumerate() {
        fields.push(
            Field::new(
                Category::Strengths,
                format!("strengths[{idx}].title"),
                "strength title",
                &strength.title,
            )
            .with_rule(MatchRule::Title),
        );
        fields.push(
            Field::new(
                Category::Strengths,
                format!("strengths[{idx}].description"),
                "strength description",
                &strength.description,
            )
            .with_rule(MatchRule::Prefix(limits.description_prefix_chars))
            .with_display(strength.title.clone()),
        );
    }
    fields
}

/// First N items of each configured skill category. Absent categories are skipped.
pub fn skill_fields(records: &RecordSet, limits: &LayoutLimits) -> Vec<Field> {
    let mut fields = Vec::new();
    for check in &limits.skill_checks {
        let Some(items) = records.skills.get(&check.category) else {
            continue;
        };
        for (idx, skill) in items.iter().take(check.limit).enumerate() {
            fields.push(Field::new(
                Category::Skills,
                format!("skills[{}][{idx}]", check.category),
                check.label.clone(),
                skill,
            ));
        }
    }
    fields
}

/// First N certification names.
pub fn certification_fields(records: &RecordSet, limits: &LayoutLimits) -> Vec<Field> {
    records
        .certifications
        .iter()
        .take(limits.certifications)
        .enumerate()
        .map(|(idx, cert)| {
            Field::new(
                Category::Certifications,
                format!("certifications[{idx}].name"),
                "certification",
                &cert.name,
            )
        })
        .collect()
}

/// Fields for one category.
pub fn category_fields(
    category: Category,
    records: &RecordSet,
    variant: &str,
    limits: &LayoutLimits,
) -> Vec<Field> {
    match category {
        Category::Personal => personal_fields(records, variant),
        Category::Experience => experience_fields(records, limits),
        Category::Education => education_fields(records),
        Category::Strengths => strength_fields(records, limits),
        Category::Skills => skill_fields(records, limits),
        Category::Certifications => certification_fields(records, limits),
    }
}
