use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A borrowed view of one `risk_factors` entry: `{ factor, reason, weight }`.
///
/// Entries are never coerced into a fixed shape. Every array entry renders
/// into the prompt, with missing fields shown as `undefined`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactor<'a> {
    pub factor: Option<&'a Value>,
    pub reason: Option<&'a Value>,
    /// 0 – 100, usually a number but rendered whatever its type
    pub weight: Option<&'a Value>,
}

impl<'a> RiskFactor<'a> {
    pub fn from_entry(entry: &'a Value) -> Self {
        Self {
            factor: entry.get("factor"),
            reason: entry.get("reason"),
            weight: entry.get("weight"),
        }
    }

    /// `- <factor> - <reason> - (Weight: <weight>/100)`
    pub fn prompt_line(&self) -> String {
        format!(
            "- {} - {} - (Weight: {}/100)",
            display_field(self.factor),
            display_field(self.reason),
            display_field(self.weight)
        )
    }
}

/// A validated contractor payload. Only built by `validation::validate_contractor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractorInput {
    pub name: String,
    pub project_description: String,
    pub access_level: String,
    pub application: String,
    pub has_prod_access: bool,
    /// Exactly as received; `None` when the key is absent.
    pub risk_score: Option<Value>,
    /// Exactly as received; `None` when the key is absent. May be any JSON value.
    pub risk_factors: Option<Value>,
}

impl ContractorInput {
    /// The risk factor entries, or `None` when `risk_factors` is absent or not an array.
    pub fn risk_factor_entries(&self) -> Option<Vec<RiskFactor<'_>>> {
        let items = self.risk_factors.as_ref()?.as_array()?;
        Some(items.iter().map(RiskFactor::from_entry).collect())
    }
}

/// Renders a JSON value the way it reads in a sentence: strings unquoted,
/// whole-valued numbers without a fraction (`90.0` → `90`), containers as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        Value::Number(n) => match n.as_f64() {
            // f64 Display already drops a zero fraction
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn display_field(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), display_value)
}

/// Priority requested by the prompt. Matched case-insensitively; output is never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        [Priority::High, Priority::Medium, Priority::Low]
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// The shape the prompt asks the model for. Used to audit model output;
/// the response itself carries the raw objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub reason: String,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_factors_addressed: Option<Vec<String>>,
}

/// Successful pipeline output, serialized as the 200 response body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub contractor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_factors: Option<Value>,
    pub recommendations: Vec<Value>,
    /// ISO-8601 with millisecond precision.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse(" Medium "), Some(Priority::Medium));
        assert_eq!(Priority::parse("low"), Some(Priority::Low));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_recommendation_risk_factors_addressed_is_optional() {
        let rec: Recommendation = serde_json::from_value(json!({
            "title": "Revoke admin",
            "description": "Downgrade to read",
            "reason": "Excessive permissions",
            "priority": "high"
        }))
        .unwrap();
        assert!(rec.risk_factors_addressed.is_none());
    }

    #[test]
    fn test_report_uses_camel_case_and_omits_absent_score() {
        let report = RecommendationReport {
            contractor: "Alice".to_string(),
            risk_score: None,
            risk_factors: Some(json!([])),
            recommendations: vec![json!({"title": "t"})],
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("riskScore").is_none());
        assert_eq!(value["riskFactors"], json!([]));
        assert_eq!(value["recommendations"][0]["title"], "t");
    }

    #[test]
    fn test_display_value_matches_sentence_rendering() {
        assert_eq!(display_value(&json!("90")), "90");
        assert_eq!(display_value(&json!(90)), "90");
        assert_eq!(display_value(&json!(90.0)), "90");
        assert_eq!(display_value(&json!(12.5)), "12.5");
        assert_eq!(display_value(&json!(-3)), "-3");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!(null)), "null");
    }

    #[test]
    fn test_prompt_line_renders_any_field_types() {
        let entry = json!({"factor": "Excessive permissions", "reason": "Has admin on prod", "weight": "90", "category": "access"});
        assert_eq!(
            RiskFactor::from_entry(&entry).prompt_line(),
            "- Excessive permissions - Has admin on prod - (Weight: 90/100)"
        );
    }

    #[test]
    fn test_prompt_line_marks_missing_fields() {
        let entry = json!({"factor": "Stale account"});
        assert_eq!(
            RiskFactor::from_entry(&entry).prompt_line(),
            "- Stale account - undefined - (Weight: undefined/100)"
        );
        assert_eq!(
            RiskFactor::from_entry(&json!("not an object")).prompt_line(),
            "- undefined - undefined - (Weight: undefined/100)"
        );
    }

    #[test]
    fn test_risk_factor_entries_requires_array() {
        let mut input = ContractorInput {
            name: "Alice".to_string(),
            project_description: "Data migration".to_string(),
            access_level: "admin".to_string(),
            application: "CRM".to_string(),
            has_prod_access: false,
            risk_score: None,
            risk_factors: Some(json!("none")),
        };
        assert!(input.risk_factor_entries().is_none());

        input.risk_factors = Some(json!([{"factor": "a"}, 7]));
        assert_eq!(input.risk_factor_entries().unwrap().len(), 2);
    }
}
