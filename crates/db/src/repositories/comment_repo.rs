//! Repository for the `comments` table.

use incidents_core::search::{
    clamp_limit, clamp_offset, contains_pattern, normalize_term, DEFAULT_LIST_LIMIT,
    MAX_LIST_LIMIT,
};
use incidents_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentFilter, CreateComment};

/// Column list for queries over `comments c JOIN users u`.
const COLUMNS: &str = "c.id, c.incident_id, c.author_id, u.username AS author_username, \
    c.body, c.is_internal, c.created_at";

/// Provides create and listing operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "WITH c AS (
                INSERT INTO comments (incident_id, author_id, body, is_internal)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM c JOIN users u ON u.id = c.author_id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.incident_id)
            .bind(input.author_id)
            .bind(&input.body)
            .bind(input.is_internal)
            .fetch_one(pool)
            .await
    }

    /// All comments on an incident in conversation order (oldest first).
    ///
    /// Internal comments are included; callers apply the visibility policy.
    pub async fn list_for_incident(
        pool: &PgPool,
        incident_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments c JOIN users u ON u.id = c.author_id
             WHERE c.incident_id = $1
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(incident_id)
            .fetch_all(pool)
            .await
    }

    /// Staff listing across all incidents, newest first, with an optional
    /// internal filter and free-text search over body, author username and
    /// incident title.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &CommentFilter,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);
        let pattern = normalize_term(filter.q.as_deref()).map(contains_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM comments c
             JOIN users u ON u.id = c.author_id
             JOIN incidents i ON i.id = c.incident_id
             WHERE ($1::BOOL IS NULL OR c.is_internal = $1)
               AND ($2::TEXT IS NULL
                    OR c.body ILIKE $2 OR u.username ILIKE $2 OR i.title ILIKE $2)
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(filter.is_internal)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
