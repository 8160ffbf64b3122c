//! Repositories for `compliance_checks` and `policy_violations`.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::compliance::{
    ComplianceCheck, ComplianceCheckListParams, CreateComplianceCheck, CreatePolicyViolation,
    PolicyViolation, PolicyViolationListParams, UpdateComplianceCheck, UpdatePolicyViolation,
};
use crate::pagination::{clamp_limit, clamp_offset};

const CHECK_COLUMNS: &str = "id, name, category, status, entity_type, entity_id, \
                              last_checked_at, notes, created_at, updated_at";

const VIOLATION_COLUMNS: &str = "id, policy, severity, entity_type, entity_id, description, \
                                  status, created_at, updated_at";

// ---------------------------------------------------------------------------
// Compliance checks
// ---------------------------------------------------------------------------

/// Provides CRUD operations for compliance checks.
pub struct ComplianceCheckRepo;

impl ComplianceCheckRepo {
    /// Insert a new check. A check created with a non-pending status counts
    /// as evaluated and gets `last_checked_at` stamped.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComplianceCheck,
    ) -> Result<ComplianceCheck, sqlx::Error> {
        let query = format!(
            "INSERT INTO compliance_checks (name, category, status, entity_type, entity_id, \
                                            notes, last_checked_at)
             VALUES ($1, $2, COALESCE($3::TEXT, 'pending'), $4, $5, $6,
                     CASE WHEN COALESCE($3::TEXT, 'pending') = 'pending' THEN NULL ELSE NOW() END)
             RETURNING {CHECK_COLUMNS}"
        );
        sqlx::query_as::<_, ComplianceCheck>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ComplianceCheck>, sqlx::Error> {
        let query = format!("SELECT {CHECK_COLUMNS} FROM compliance_checks WHERE id = $1");
        sqlx::query_as::<_, ComplianceCheck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &ComplianceCheckListParams,
    ) -> Result<Vec<ComplianceCheck>, sqlx::Error> {
        let query = format!(
            "SELECT {CHECK_COLUMNS} FROM compliance_checks
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ComplianceCheck>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.status)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Status of every check, for the compliance dashboard.
    pub async fn list_statuses(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT status FROM compliance_checks ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Update a check. A present `status` also stamps `last_checked_at`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComplianceCheck,
    ) -> Result<Option<ComplianceCheck>, sqlx::Error> {
        let query = format!(
            "UPDATE compliance_checks SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                status = COALESCE($4, status),
                notes = COALESCE($5, notes),
                last_checked_at = CASE WHEN $4::TEXT IS NULL THEN last_checked_at ELSE NOW() END
             WHERE id = $1
             RETURNING {CHECK_COLUMNS}"
        );
        sqlx::query_as::<_, ComplianceCheck>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM compliance_checks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Policy violations
// ---------------------------------------------------------------------------

/// Provides CRUD operations for policy violations.
pub struct PolicyViolationRepo;

impl PolicyViolationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePolicyViolation,
    ) -> Result<PolicyViolation, sqlx::Error> {
        let query = format!(
            "INSERT INTO policy_violations (policy, severity, entity_type, entity_id, description)
             VALUES ($1, COALESCE($2, 'medium'), $3, $4, $5)
             RETURNING {VIOLATION_COLUMNS}"
        );
        sqlx::query_as::<_, PolicyViolation>(&query)
            .bind(&input.policy)
            .bind(&input.severity)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PolicyViolation>, sqlx::Error> {
        let query = format!("SELECT {VIOLATION_COLUMNS} FROM policy_violations WHERE id = $1");
        sqlx::query_as::<_, PolicyViolation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &PolicyViolationListParams,
    ) -> Result<Vec<PolicyViolation>, sqlx::Error> {
        let query = format!(
            "SELECT {VIOLATION_COLUMNS} FROM policy_violations
             WHERE ($1::TEXT IS NULL OR policy ILIKE $1 OR description ILIKE $1)
               AND ($2::TEXT IS NULL OR severity = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, PolicyViolation>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.severity)
            .bind(&params.status)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Number of open violations.
    pub async fn count_open(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM policy_violations WHERE status = 'open'")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePolicyViolation,
    ) -> Result<Option<PolicyViolation>, sqlx::Error> {
        let query = format!(
            "UPDATE policy_violations SET
                severity = COALESCE($2, severity),
                description = COALESCE($3, description),
                status = COALESCE($4, status)
             WHERE id = $1
             RETURNING {VIOLATION_COLUMNS}"
        );
        sqlx::query_as::<_, PolicyViolation>(&query)
            .bind(id)
            .bind(&input.severity)
            .bind(&input.description)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM policy_violations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
