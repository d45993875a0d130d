//! Axum route handlers for the Recommendations API.

use anyhow::Context;
use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::recommendations::generator::generate_recommendations;
use crate::recommendations::models::RecommendationReport;
use crate::recommendations::validation::validate_contractor;
use crate::state::AppState;

/// POST /recommendations
///
/// Accepts one contractor (a full listing row or a minimal ad-hoc payload) and
/// returns 1–3 model-generated remediation recommendations. The body is parsed
/// as JSON regardless of content type.
pub async fn handle_generate_recommendations(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendationReport>, AppError> {
    info!("Recommendation request received ({} bytes)", body.len());

    let payload: Value =
        serde_json::from_slice(&body).context("Request body is not valid JSON")?;

    let contractor = validate_contractor(&payload)?;
    info!("Contractor payload validated for '{}'", contractor.name);

    let report = generate_recommendations(state.llm.as_ref(), &contractor).await?;
    Ok(Json(report))
}
