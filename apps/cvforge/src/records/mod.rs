// Record Set: the typed, immutable career data every renderer and check reads from.
// Loaded once per run from a declared set of category files; nothing is cached globally.

pub mod loader;
pub mod models;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use loader::load_record_set;
pub use models::{
    Certification, Education, Job, Personal, RecordSet, SkillCatalog, SkillGroup, Strength,
};

/// The required record categories. Each maps to `<data_dir>/<category>.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Personal,
    Experience,
    Skills,
    Strengths,
    Education,
    Certifications,
}

impl Category {
    /// Declaration order. Missing-category errors list names in this order.
    pub const ALL: [Category; 6] = [
        Category::Personal,
        Category::Experience,
        Category::Skills,
        Category::Strengths,
        Category::Education,
        Category::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "personal",
            Category::Experience => "experience",
            Category::Skills => "skills",
            Category::Strengths => "strengths",
            Category::Education => "education",
            Category::Certifications => "certifications",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub(crate) mod fixtures;
