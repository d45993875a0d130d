use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// One contractor joined with the output of `calculate_contractor_risk_score`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContractorRow {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub job_title: Option<String>,
    pub project_description: Option<String>,
    pub role: Option<String>,
    pub application: Option<String>,
    pub access_level: Option<String>,
    pub contract_start: Option<NaiveDate>,
    pub contract_end: Option<NaiveDate>,
    pub last_sign_in: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub has_prod_access: bool,
    pub risk_score: Option<f64>,
    /// Passed through as the risk routine produced it.
    pub risk_factors: Option<Value>,
    pub calculation_details: Option<Value>,
}

/// Coarse bucket shown next to the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl RiskLevel {
    const HIGH_THRESHOLD: f64 = 70.0;
    const MEDIUM_THRESHOLD: f64 = 30.0;

    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s >= Self::HIGH_THRESHOLD => RiskLevel::High,
            Some(s) if s >= Self::MEDIUM_THRESHOLD => RiskLevel::Medium,
            Some(s) if s.is_finite() => RiskLevel::Low,
            _ => RiskLevel::Unknown,
        }
    }
}

/// Listing entry: the row plus its derived risk level.
#[derive(Debug, Clone, Serialize)]
pub struct ContractorSummary {
    #[serde(flatten)]
    pub contractor: ContractorRow,
    pub risk_level: RiskLevel,
}

impl From<ContractorRow> for ContractorSummary {
    fn from(contractor: ContractorRow) -> Self {
        let risk_level = RiskLevel::from_score(contractor.risk_score);
        Self {
            contractor,
            risk_level,
        }
    }
}
