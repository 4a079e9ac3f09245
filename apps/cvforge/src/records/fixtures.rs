//! Shared record fixtures for unit tests. Same files the CLI tests use.

use std::collections::BTreeMap;

use tempfile::TempDir;

use crate::records::{Category, RecordSet};

pub const PERSONAL: &str = include_str!("../../tests/fixtures/data/personal.yaml");
pub const EXPERIENCE: &str = include_str!("../../tests/fixtures/data/experience.yaml");
pub const SKILLS: &str = include_str!("../../tests/fixtures/data/skills.yaml");
pub const STRENGTHS: &str = include_str!("../../tests/fixtures/data/strengths.yaml");
pub const EDUCATION: &str = include_str!("../../tests/fixtures/data/education.yaml");
pub const CERTIFICATIONS: &str = include_str!("../../tests/fixtures/data/certifications.yaml");

fn sources() -> [(Category, &'static str); 6] {
    [
        (Category::Personal, PERSONAL),
        (Category::Experience, EXPERIENCE),
        (Category::Skills, SKILLS),
        (Category::Strengths, STRENGTHS),
        (Category::Education, EDUCATION),
        (Category::Certifications, CERTIFICATIONS),
    ]
}

pub fn sample_records() -> RecordSet {
    let documents: BTreeMap<String, serde_yaml::Value> = sources()
        .into_iter()
        .map(|(c, raw)| (c.as_str().to_string(), serde_yaml::from_str(raw).unwrap()))
        .collect();
    RecordSet::from_documents(documents).unwrap()
}

/// Writes every fixture category into a fresh temp directory.
pub fn write_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for (category, raw) in sources() {
        std::fs::write(dir.path().join(format!("{}.yaml", category.as_str())), raw).unwrap();
    }
    dir
}
