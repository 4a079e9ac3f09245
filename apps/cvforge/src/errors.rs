use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::records::Category;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Field-missing findings are NOT errors; they accumulate as `Issue`s on a
/// verdict. Only conditions that abort a run, a variant, or a request live here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Fatal for the whole run. Lists every absent category, in declaration order.
    #[error("Missing required record categories: {}", join_categories(.0))]
    MissingCategories(Vec<Category>),

    #[error("Invalid {category} records: {message}")]
    InvalidRecord { category: Category, message: String },

    /// Fatal for a single variant only.
    #[error("Text extraction failed for {path}: {reason}")]
    Extraction { path: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn join_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingCategories(_) | AppError::InvalidRecord { .. } => {
                tracing::error!("Record set error: {self}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "RECORD_ERROR",
                    self.to_string(),
                )
            }
            AppError::Extraction { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                self.to_string(),
            ),
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Document rendering failed".to_string(),
                )
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "A filesystem error occurred".to_string(),
                )
            }
            AppError::Yaml(e) => {
                tracing::error!("YAML error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "YAML_ERROR",
                    "Record data could not be parsed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_categories_message_names_every_category() {
        let err = AppError::MissingCategories(vec![Category::Skills, Category::Certifications]);
        assert_eq!(
            err.to_string(),
            "Missing required record categories: skills, certifications"
        );
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("variant is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_render_error_hides_details_behind_500() {
        let response = AppError::Render("latexmk exited with 12".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_and_yaml_errors_map_to_500() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let response = AppError::from(io).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let yaml = serde_yaml::from_str::<Vec<String>>("{").unwrap_err();
        let response = AppError::from(yaml).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
