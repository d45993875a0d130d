//! Recommendation Generation — orchestrates the per-request pipeline.
//!
//! Flow: Validated → PromptBuilt → AwaitingModel → Parsed | Failed.
//! Exactly one model call per request. Any failure is terminal; nothing is retried,
//! cached or persisted.

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::recommendations::extraction::extract_recommendations;
use crate::recommendations::models::{
    ContractorInput, Priority, Recommendation, RecommendationReport,
};
use crate::recommendations::prompts::build_prompt;

const MIN_RECOMMENDATIONS: usize = 1;
const MAX_RECOMMENDATIONS: usize = 3;

/// Outcome of checking model output against the requested shape.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecommendationAudit {
    pub conforming: usize,
    pub nonconforming: usize,
}

/// Runs prompt construction, the model call and response extraction for one
/// validated contractor.
pub async fn generate_recommendations(
    llm: &dyn TextGenerator,
    contractor: &ContractorInput,
) -> Result<RecommendationReport, AppError> {
    let prompt = build_prompt(contractor, Utc::now());
    info!("Prompt built for contractor '{}'", contractor.name);
    debug!("Prompt created:\n{prompt}");

    info!(
        "Requesting recommendations from {} for '{}'",
        llm.model_name(),
        contractor.name
    );
    let envelope = llm.generate(&prompt).await?;

    let recommendations = extract_recommendations(&envelope)?;
    let audit = audit_recommendations(&recommendations);
    info!(
        "Parsed {} recommendations for '{}' ({} nonconforming)",
        recommendations.len(),
        contractor.name,
        audit.nonconforming
    );

    Ok(RecommendationReport {
        contractor: contractor.name.clone(),
        risk_score: contractor.risk_score.clone(),
        risk_factors: contractor.risk_factors.clone(),
        recommendations,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Checks model output against the prompt's contract without rewriting it.
/// Nonconforming items are logged and passed through.
pub fn audit_recommendations(items: &[Value]) -> RecommendationAudit {
    if !(MIN_RECOMMENDATIONS..=MAX_RECOMMENDATIONS).contains(&items.len()) {
        warn!(
            "Model returned {} recommendations (expected {MIN_RECOMMENDATIONS}-{MAX_RECOMMENDATIONS})",
            items.len()
        );
    }

    let mut audit = RecommendationAudit::default();
    for (idx, item) in items.iter().enumerate() {
        match serde_json::from_value::<Recommendation>(item.clone()) {
            Ok(rec) if Priority::parse(&rec.priority).is_some() => audit.conforming += 1,
            Ok(rec) => {
                warn!("Recommendation {idx} has unexpected priority {:?}", rec.priority);
                audit.nonconforming += 1;
            }
            Err(e) => {
                warn!("Recommendation {idx} does not match the requested shape: {e}");
                audit.nonconforming += 1;
            }
        }
    }
    audit
}
