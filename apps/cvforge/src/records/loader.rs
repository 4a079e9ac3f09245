use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::records::{Category, RecordSet};

/// Loads the declared category files from `data_dir` into a typed `RecordSet`.
///
/// Only `<category>.yaml` for each required category is read. Other files in
/// the directory are ignored. Absent files surface together as one
/// `MissingCategories` error.
pub fn load_record_set(data_dir: &Path) -> Result<RecordSet, AppError> {
    if !data_dir.is_dir() {
        return Err(AppError::NotFound(format!(
            "Data directory not found: {}",
            data_dir.display()
        )));
    }

    let mut documents = BTreeMap::new();
    for category in Category::ALL {
        let path = data_dir.join(format!("{}.yaml", category.as_str()));
        if !path.is_file() {
            debug!(category = %category, path = %path.display(), "Category file absent");
            continue;
        }

        let raw = std::fs::read_to_string(&path)?;
        let value: Value = serde_yaml::from_str(&raw).map_err(|e| AppError::InvalidRecord {
            category,
            message: format!("{}: {e}", path.display()),
        })?;
        documents.insert(category.as_str().to_string(), value);
    }

    let records = RecordSet::from_documents(documents)?;
    info!(
        experience = records.experience.len(),
        strengths = records.strengths.len(),
        education = records.education.len(),
        certifications = records.certifications.len(),
        "Loaded record set from {}",
        data_dir.display()
    );
    Ok(records)
}
