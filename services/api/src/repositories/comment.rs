//! Comment repository for database operations

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::comment::{Comment, CommentWithAuthor};

/// Comment repository for database operations
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new comment against an existing video
    pub async fn create(&self, video_id: Uuid, owner_id: Uuid, content: &str) -> Result<Comment> {
        let row = sqlx::query(
            r#"
            INSERT INTO comments (content, video_id, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, video_id, owner_id, created_at, updated_at
            "#,
        )
        .bind(content)
        .bind(video_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment_from_row(&row))
    }

    /// Find a comment by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r#"
            SELECT id, content, video_id, owner_id, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(comment_from_row))
    }

    /// List a video's comments newest-first, joined with the author's
    /// username, paginated with a total count
    pub async fn list_for_video(
        &self,
        video_id: Uuid,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<CommentWithAuthor>, i64)> {
        let offset = (page - 1) as i64 * limit as i64;

        let rows = sqlx::query(
            r#"
            SELECT c.id, c.content, c.created_at, u.username
            FROM comments c
            JOIN users u ON u.id = c.owner_id
            WHERE c.video_id = $1
            ORDER BY c.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(video_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(&self.pool)
            .await?;

        let comments = rows
            .into_iter()
            .map(|row| CommentWithAuthor {
                id: row.get("id"),
                content: row.get("content"),
                created_at: row.get("created_at"),
                username: row.get("username"),
            })
            .collect();

        Ok((comments, total))
    }

    /// Replace a comment's content
    pub async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, content, video_id, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(comment_from_row))
    }

    /// Delete a comment by ID, returning the deleted record
    pub async fn delete(&self, id: Uuid) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            RETURNING id, content, video_id, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(comment_from_row))
    }
}

fn comment_from_row(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        content: row.get("content"),
        video_id: row.get("video_id"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
