//! Repository for the `people` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::person::{CreatePerson, Person, PersonListParams, UpdatePerson};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, email, department, title, location, employee_number, \
                        is_active, created_at, updated_at";

/// Provides CRUD operations for people.
pub struct PersonRepo;

impl PersonRepo {
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (name, email, department, title, location, employee_number)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .bind(&input.title)
            .bind(&input.location)
            .bind(&input.employee_number)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List people alphabetically. Inactive people are hidden unless
    /// `include_inactive` is set.
    pub async fn list(
        pool: &PgPool,
        params: &PersonListParams,
    ) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM people
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR email ILIKE $1
                    OR department ILIKE $1 OR employee_number ILIKE $1)
               AND ($2::TEXT IS NULL OR department = $2)
               AND ($3 OR is_active)
             ORDER BY name, id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.department)
            .bind(params.include_inactive)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Number of people rows, active or not; the dashboard's user count.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM people")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePerson,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "UPDATE people SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                department = COALESCE($4, department),
                title = COALESCE($5, title),
                location = COALESCE($6, location),
                employee_number = COALESCE($7, employee_number),
                is_active = COALESCE($8, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.department)
            .bind(&input.title)
            .bind(&input.location)
            .bind(&input.employee_number)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a person. Assets and licenses assigned to them become unassigned.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
