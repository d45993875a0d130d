use sqlx::PgPool;
use tracing::info;

use crate::contractors::models::ContractorRow;

/// Risk is computed server-side per contractor; contractors without a result keep NULL risk fields.
const LIST_CONTRACTORS_SQL: &str = r#"
    SELECT
        c.id,
        c.name,
        c.email,
        c.job_title,
        c.project_description,
        c.role,
        c.application,
        c.access_level,
        c.contract_start,
        c.contract_end,
        c.last_sign_in,
        c.updated_at,
        COALESCE(c.has_prod_access, false) AS has_prod_access,
        risk.risk_score::float8 AS risk_score,
        risk.risk_factors,
        risk.calculation_details
    FROM contractors c
    LEFT JOIN LATERAL calculate_contractor_risk_score(c.id) AS risk ON true
    ORDER BY c.id ASC
"#;

/// Returns every contractor with its computed risk fields, ordered by id.
pub async fn list_contractors(pool: &PgPool) -> Result<Vec<ContractorRow>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ContractorRow>(LIST_CONTRACTORS_SQL)
        .fetch_all(pool)
        .await?;

    info!("Loaded {} contractors with risk scores", rows.len());
    Ok(rows)
}
