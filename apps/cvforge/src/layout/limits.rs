//! Layout limits: the single table of truncation rules shared by the
//! renderers and the completeness checker.
//!
//! Both sides MUST read these values from the same `LayoutLimits` instance.
//! If a renderer shows fewer entries than the checker expects, every run
//! reports false failures; if it shows more, the checker silently skips data.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Skill checks
// ────────────────────────────────────────────────────────────────────────────

/// One skill category the checker verifies. Category names are data, not code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCheck {
    /// Category key in `skills.yaml`.
    pub category: String,
    /// Only the first `limit` items are checked.
    pub limit: usize,
    /// Human label used in issue messages, e.g. "programming skill".
    pub label: String,
}

impl SkillCheck {
    pub fn new(category: &str, limit: usize, label: &str) -> Self {
        Self {
            category: category.to_string(),
            limit,
            label: label.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Limits table
// ────────────────────────────────────────────────────────────────────────────

/// Single-page layout limits.
///
/// Any field omitted from a limits file keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutLimits {
    /// Primary experience entries shown (and checked).
    pub experience: usize,
    /// Bullets per primary experience entry.
    pub achievements_per_job: usize,
    /// Entries in the leadership section of the typeset variants.
    pub leadership_entries: usize,
    pub leadership_achievements: usize,
    /// Strengths shown in the core strengths section (and checked).
    pub strengths: usize,
    /// Certifications shown in the typeset variants (and checked).
    pub certifications: usize,
    /// Certifications listed in the ATS text when no tag filter matches.
    pub ats_certifications: usize,
    /// Leading characters of the first achievement that must appear.
    pub achievement_prefix_chars: usize,
    /// Leading characters of a strength description that must appear.
    pub description_prefix_chars: usize,
    /// Title fallback keeps only words strictly longer than this.
    pub title_word_min_len: usize,
    pub skill_checks: Vec<SkillCheck>,
}

impl Default for LayoutLimits {
    fn default() -> Self {
        Self {
            experience: 3,
            achievements_per_job: 4,
            leadership_entries: 2,
            leadership_achievements: 2,
            strengths: 3,
            certifications: 4,
            ats_certifications: 5,
            achievement_prefix_chars: 30,
            description_prefix_chars: 20,
            title_word_min_len: 3,
            skill_checks: vec![
                SkillCheck::new("Programming & Computation", 6, "programming skill"),
                SkillCheck::new("Machine Learning & Statistics", 8, "ML/statistics skill"),
            ],
        }
    }
}

impl LayoutLimits {
    /// Loads limits from a YAML file; missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::NotFound(format!("Layout limits file {}: {e}", path.display()))
        })?;
        let limits: LayoutLimits = serde_yaml::from_str(&raw)?;
        Ok(limits)
    }

    /// `from_file` when a path is configured, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
