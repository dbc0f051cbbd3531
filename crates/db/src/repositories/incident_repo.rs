//! Repository for the `incidents` table.

use incidents_core::forms::{CleanedIncident, CleanedIncidentUpdate};
use incidents_core::search::{
    clamp_limit, clamp_offset, contains_pattern, normalize_term, DEFAULT_LIST_LIMIT,
    MAX_LIST_LIMIT,
};
use incidents_core::types::DbId;
use sqlx::PgPool;

use crate::models::incident::{Incident, IncidentFilter};

/// Column list for queries over `incidents i JOIN users u`.
const COLUMNS: &str = "i.id, i.title, i.description, i.category, i.severity, i.status, \
    i.reporter_id, u.username AS reporter_username, i.is_anonymous, i.created_at, i.updated_at";

/// Newest first; id breaks ties between rows created in the same instant.
const ORDER_NEWEST_FIRST: &str = "ORDER BY i.created_at DESC, i.id DESC";

/// Provides CRUD and listing operations for incidents.
pub struct IncidentRepo;

impl IncidentRepo {
    /// Insert a validated incident for `reporter_id`, returning the created row.
    ///
    /// Status is left to the column default (`OPEN`).
    pub async fn create(
        pool: &PgPool,
        reporter_id: DbId,
        input: &CleanedIncident,
    ) -> Result<Incident, sqlx::Error> {
        let query = format!(
            "WITH i AS (
                INSERT INTO incidents (title, description, category, severity, reporter_id, is_anonymous)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             )
             SELECT {COLUMNS} FROM i JOIN users u ON u.id = i.reporter_id"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category.as_str())
            .bind(input.severity.as_str())
            .bind(reporter_id)
            .bind(input.is_anonymous)
            .fetch_one(pool)
            .await
    }

    /// Find an incident by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM incidents i JOIN users u ON u.id = i.reporter_id
             WHERE i.id = $1"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List incidents newest first.
    ///
    /// A non-blank `search` term keeps only incidents whose title or
    /// description contains it (case-insensitive, matched literally).
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Incident>, sqlx::Error> {
        let pattern = normalize_term(search).map(contains_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM incidents i JOIN users u ON u.id = i.reporter_id
             WHERE ($1::TEXT IS NULL OR i.title ILIKE $1 OR i.description ILIKE $1)
             {ORDER_NEWEST_FIRST}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Staff listing with optional classification filters and free-text
    /// search over title, description and reporter username.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &IncidentFilter,
    ) -> Result<Vec<Incident>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);
        let pattern = normalize_term(filter.q.as_deref()).map(contains_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM incidents i JOIN users u ON u.id = i.reporter_id
             WHERE ($1::TEXT IS NULL OR i.category = $1)
               AND ($2::TEXT IS NULL OR i.severity = $2)
               AND ($3::TEXT IS NULL OR i.status = $3)
               AND ($4::BOOL IS NULL OR i.is_anonymous = $4)
               AND ($5::TEXT IS NULL
                    OR i.title ILIKE $5 OR i.description ILIKE $5 OR u.username ILIKE $5)
             {ORDER_NEWEST_FIRST}
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.severity.map(|s| s.as_str()))
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.is_anonymous)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a staff update to status and classification, returning the
    /// updated row. `None` fields keep their stored value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CleanedIncidentUpdate,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "WITH i AS (
                UPDATE incidents SET
                    status = COALESCE($2, status),
                    severity = COALESCE($3, severity),
                    category = COALESCE($4, category)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM i JOIN users u ON u.id = i.reporter_id"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.severity.map(|s| s.as_str()))
            .bind(input.category.map(|c| c.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an incident and, by cascade, its comments.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
