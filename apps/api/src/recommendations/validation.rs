//! Request validation — turns a raw JSON payload into a `ContractorInput`.
//!
//! The four required fields must all be present and truthy: a missing key,
//! `null`, `false`, `0` and `""` are all rejected the same way.

use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::recommendations::models::{display_value, ContractorInput};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

const REQUIRED_FIELDS: [&str; 4] = ["name", "project_description", "access_level", "application"];

/// Validates an inbound contractor payload. No partial-field mode: any missing
/// required field rejects the whole request with the same message.
pub fn validate_contractor(payload: &Value) -> Result<ContractorInput, AppError> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| !fields.get(*key).is_some_and(is_truthy))
        .collect();

    if !missing.is_empty() {
        warn!("Rejecting contractor payload, missing: {}", missing.join(", "));
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    Ok(ContractorInput {
        name: display_field(fields, "name"),
        project_description: display_field(fields, "project_description"),
        access_level: display_field(fields, "access_level"),
        application: display_field(fields, "application"),
        has_prod_access: fields.get("has_prod_access").is_some_and(is_truthy),
        risk_score: fields.get("risk_score").cloned(),
        risk_factors: fields.get("risk_factors").cloned(),
    })
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy; containers are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_field(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).map(display_value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "name": "Alice",
            "project_description": "Data migration",
            "access_level": "admin",
            "application": "CRM",
            "has_prod_access": true,
            "risk_score": 85,
            "risk_factors": [
                {"factor": "Excessive permissions", "reason": "Has admin on prod", "weight": 90}
            ]
        })
    }

    fn assert_missing_fields(result: Result<ContractorInput, AppError>) {
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, MISSING_FIELDS_MESSAGE),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_full_payload() {
        let input = validate_contractor(&full_payload()).unwrap();
        assert_eq!(input.name, "Alice");
        assert_eq!(input.application, "CRM");
        assert!(input.has_prod_access);
        assert_eq!(input.risk_score, Some(json!(85)));
        assert_eq!(input.risk_factors.as_ref(), full_payload().get("risk_factors"));
    }

    #[test]
    fn test_accepts_minimal_payload() {
        let input = validate_contractor(&json!({
            "name": "Bob",
            "project_description": "Audit",
            "access_level": "read",
            "application": "ERP"
        }))
        .unwrap();
        assert!(!input.has_prod_access);
        assert!(input.risk_score.is_none());
        assert!(input.risk_factors.is_none());
    }

    #[test]
    fn test_rejects_each_missing_required_field() {
        for field in REQUIRED_FIELDS {
            let mut payload = full_payload();
            payload.as_object_mut().unwrap().remove(field);
            assert_missing_fields(validate_contractor(&payload));
        }
    }

    #[test]
    fn test_rejects_falsy_required_values() {
        for falsy in [json!(""), json!(null), json!(false), json!(0)] {
            let mut payload = full_payload();
            payload["access_level"] = falsy;
            assert_missing_fields(validate_contractor(&payload));
        }
    }

    #[test]
    fn test_rejects_when_several_fields_missing() {
        assert_missing_fields(validate_contractor(&json!({"name": "Alice"})));
        assert_missing_fields(validate_contractor(&json!({})));
    }

    #[test]
    fn test_rejects_non_object_payload() {
        assert_missing_fields(validate_contractor(&json!([1, 2, 3])));
        assert_missing_fields(validate_contractor(&json!("Alice")));
    }

    #[test]
    fn test_risk_fields_are_kept_verbatim() {
        let mut payload = full_payload();
        payload["risk_score"] = json!("85.00");
        payload["risk_factors"] = json!([
            {"factor": "Excessive permissions", "reason": "Has admin on prod", "weight": "90", "category": "access"},
            {"factor": "Missing weight", "reason": "oops"},
            "not an object"
        ]);
        let input = validate_contractor(&payload).unwrap();
        assert_eq!(input.risk_score, Some(json!("85.00")));
        assert_eq!(input.risk_factors, Some(payload["risk_factors"].clone()));
    }

    #[test]
    fn test_non_array_risk_factors_are_not_rejected() {
        let mut payload = full_payload();
        payload["risk_factors"] = json!("none");
        let input = validate_contractor(&payload).unwrap();
        assert_eq!(input.risk_factors, Some(json!("none")));
        assert!(input.risk_factor_entries().is_none());
    }

    #[test]
    fn test_numeric_required_field_renders_without_fraction() {
        let mut payload = full_payload();
        payload["access_level"] = json!(2.0);
        assert_eq!(validate_contractor(&payload).unwrap().access_level, "2");
    }

    #[test]
    fn test_truthy_prod_access_string() {
        let mut payload = full_payload();
        payload["has_prod_access"] = json!("yes");
        assert!(validate_contractor(&payload).unwrap().has_prod_access);
        payload["has_prod_access"] = json!(0);
        assert!(!validate_contractor(&payload).unwrap().has_prod_access);
    }
}
