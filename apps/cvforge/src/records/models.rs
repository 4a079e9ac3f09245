use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::errors::AppError;
use crate::records::Category;

// ────────────────────────────────────────────────────────────────────────────
// Category records
// ────────────────────────────────────────────────────────────────────────────

/// Contact details and the per-variant taglines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personal {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    /// Keyed by variant key, e.g. `industrial-scientist`.
    #[serde(default)]
    pub taglines: BTreeMap<String, String>,
}

impl Personal {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn tagline(&self, variant_key: &str) -> Option<&str> {
        self.taglines.get(variant_key).map(String::as_str)
    }
}

/// A single position. Order in `experience.yaml` is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub start_date: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub end_date: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Job {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| self.has_tag(t))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub start_date: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub end_date: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub date: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Skills: an ordered mapping of category name → items
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

/// Skill categories in the order they appear in `skills.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillCatalog(Vec<SkillGroup>);

impl SkillCatalog {
    /// Items for a category, or `None` if the category is absent.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.items.as_slice())
    }

    pub fn groups(&self) -> &[SkillGroup] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for SkillCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mapping = serde_yaml::Mapping::deserialize(deserializer)?;
        let mut groups = Vec::with_capacity(mapping.len());

        for (key, value) in mapping {
            let category = scalar_to_string(&key)
                .ok_or_else(|| D::Error::custom("skill category names must be scalars"))?;
            let items = match value {
                Value::Null => Vec::new(),
                Value::Sequence(seq) => seq
                    .iter()
                    .map(|v| {
                        scalar_to_string(v).ok_or_else(|| {
                            D::Error::custom(format!("skill '{category}' contains a non-scalar item"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                _ => {
                    return Err(D::Error::custom(format!(
                        "skill category '{category}' must be a list"
                    )))
                }
            };
            groups.push(SkillGroup { category, items });
        }

        Ok(SkillCatalog(groups))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record set
// ────────────────────────────────────────────────────────────────────────────

/// The full, typed record set. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSet {
    pub personal: Personal,
    pub experience: Vec<Job>,
    pub skills: SkillCatalog,
    pub strengths: Vec<Strength>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
}

impl RecordSet {
    /// Builds a record set from raw category documents keyed by category name.
    ///
    /// Fails fast with `MissingCategories` naming every absent category before
    /// any category is parsed. Unknown keys are ignored.
    pub fn from_documents(mut documents: BTreeMap<String, Value>) -> Result<Self, AppError> {
        let missing: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| !documents.contains_key(c.as_str()))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingCategories(missing));
        }

        let mut take = |category: Category| documents.remove(category.as_str()).unwrap_or_default();

        Ok(RecordSet {
            personal: parse_required(Category::Personal, take(Category::Personal))?,
            experience: parse_list(Category::Experience, take(Category::Experience))?,
            skills: parse_list(Category::Skills, take(Category::Skills))?,
            strengths: parse_list(Category::Strengths, take(Category::Strengths))?,
            education: parse_list(Category::Education, take(Category::Education))?,
            certifications: parse_list(Category::Certifications, take(Category::Certifications))?,
        })
    }
}

fn parse_required<T: DeserializeOwned>(category: Category, value: Value) -> Result<T, AppError> {
    if value.is_null() {
        return Err(AppError::InvalidRecord {
            category,
            message: "document is empty".to_string(),
        });
    }
    serde_yaml::from_value(value).map_err(|e| AppError::InvalidRecord {
        category,
        message: e.to_string(),
    })
}

/// An empty document is an empty list, not an error.
fn parse_list<T: DeserializeOwned + Default>(category: Category, value: Value) -> Result<T, AppError> {
    if value.is_null() {
        return Ok(T::default());
    }
    serde_yaml::from_value(value).map_err(|e| AppError::InvalidRecord {
        category,
        message: e.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Scalar helpers: dates like `2019` arrive as integers
// ────────────────────────────────────────────────────────────────────────────

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(String::new()),
        other => scalar_to_string(&other).ok_or_else(|| D::Error::custom("expected a scalar value")),
    }
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        other => scalar_to_string(&other)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected a scalar value")),
    }
}
