// Prompt template and builders for recommendation generation.
// The template is the only mechanism shaping model output; there is no schema mode.

use chrono::{DateTime, Utc};

use crate::recommendations::models::{ContractorInput, RiskFactor};

pub const NO_RISK_FACTORS: &str = "No specific risk factors identified.";

/// Recommendation prompt template.
/// Replace: {today}, {name}, {application}, {access_level},
///          {project_description}, {prod_access}, {risk_factors}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Create 1-3 security recommendations for a contractor. Today is {today}.

Contractor: {name}
Application: {application}
Access Level: {access_level}
Project Description: {project_description}
Production Access: {prod_access}
Risk Factors: {risk_factors}

Generate recommendations in this exact JSON format:
[
  {
    "title": "Short action title",
    "description": "Specific action to implement",
    "reason": "How this addresses the risk factors",
    "priority": "high"
  }
]

The "priority" value must be one of "high", "medium" or "low" (lowercase).

Return ONLY the JSON array with no other text."#;

/// Renders risk factors as one `- factor - reason - (Weight: N/100)` line each, in order.
pub fn format_risk_factors(risk_factors: Option<&[RiskFactor<'_>]>) -> String {
    match risk_factors {
        Some(factors) if !factors.is_empty() => factors
            .iter()
            .map(RiskFactor::prompt_line)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => NO_RISK_FACTORS.to_string(),
    }
}

/// Fills the template. `now` only gives the model temporal context.
pub fn build_prompt(contractor: &ContractorInput, now: DateTime<Utc>) -> String {
    let risk_factors = format_risk_factors(contractor.risk_factor_entries().as_deref());
    let prod_access = if contractor.has_prod_access { "Yes" } else { "No" };

    let today = now.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    fill_template(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("today", today.as_str()),
            ("name", contractor.name.as_str()),
            ("application", contractor.application.as_str()),
            ("access_level", contractor.access_level.as_str()),
            ("project_description", contractor.project_description.as_str()),
            ("prod_access", prod_access),
            ("risk_factors", risk_factors.as_str()),
        ],
    )
}

/// Single-pass `{key}` substitution. Substituted values are never rescanned,
/// and braces that don't name a known key are copied through.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let placeholder = values.iter().find(|(key, _)| {
            tail[1..].starts_with(key) && tail[1 + key.len()..].starts_with('}')
        });
        match placeholder {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
