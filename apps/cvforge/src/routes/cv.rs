use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::{render_source, OutputFormat, Variant};
use crate::state::AppState;
use crate::verify::{check_text, VariantVerdict};

#[derive(Serialize)]
pub struct VariantsResponse {
    pub variants: Vec<String>,
}

/// GET /api/v1/variants
pub async fn handle_list_variants() -> Json<VariantsResponse> {
    Json(VariantsResponse {
        variants: Variant::all_keys(),
    })
}

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub variant: String,
    #[serde(default = "default_http_format")]
    pub format: OutputFormat,
}

fn default_http_format() -> OutputFormat {
    OutputFormat::Latex
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub variant: Variant,
    pub format: OutputFormat,
    pub document: String,
}

/// POST /api/v1/cv/generate
/// Returns LaTeX source or ATS text. PDF compilation is CLI-only.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let variant: Variant = req.variant.parse()?;
    if req.format == OutputFormat::Pdf {
        return Err(AppError::Validation(
            "format 'pdf' is not served over HTTP; use 'latex' or 'ats'".into(),
        ));
    }

    let document = render_source(&state.records, variant, req.format, &state.limits)?;
    info!(variant = %variant, format = %req.format, bytes = document.len(), "Rendered document");

    Ok(Json(GenerateResponse {
        variant,
        format: req.format,
        document,
    }))
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    /// Any key is accepted; unknown variants skip the tagline check.
    pub variant: String,
    /// Text already extracted from the rendered output.
    pub text: String,
}

/// POST /api/v1/cv/verify
pub async fn handle_verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VariantVerdict>, AppError> {
    if req.variant.trim().is_empty() {
        return Err(AppError::Validation("variant must not be empty".into()));
    }
    let verdict = check_text(&state.records, &req.variant, &req.text, &state.limits);
    info!(
        variant = %req.variant,
        passed = verdict.passed,
        issues = verdict.issue_count(),
        "Verified submitted text"
    );
    Ok(Json(verdict))
}
