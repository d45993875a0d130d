use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::contractors::directory::list_contractors;
use crate::contractors::models::ContractorSummary;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorListResponse {
    pub success: bool,
    pub count: usize,
    pub contractors: Vec<ContractorSummary>,
    pub generated_at: String,
}

/// GET /contractors
pub async fn handle_list_contractors(
    State(state): State<AppState>,
) -> Result<Json<ContractorListResponse>, AppError> {
    let contractors: Vec<ContractorSummary> = list_contractors(&state.db)
        .await?
        .into_iter()
        .map(ContractorSummary::from)
        .collect();

    Ok(Json(ContractorListResponse {
        success: true,
        count: contractors.len(),
        contractors,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
