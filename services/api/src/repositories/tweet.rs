//! Tweet repository for database operations

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::tweet::{Tweet, TweetSummary};

/// Tweet repository for database operations
#[derive(Clone)]
pub struct TweetRepository {
    pool: PgPool,
}

impl TweetRepository {
    /// Create a new tweet repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new tweet
    pub async fn create(&self, owner_id: Uuid, content: &str) -> Result<Tweet> {
        let row = sqlx::query(
            r#"
            INSERT INTO tweets (content, owner_id)
            VALUES ($1, $2)
            RETURNING id, content, owner_id, created_at, updated_at
            "#,
        )
        .bind(content)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tweet_from_row(&row))
    }

    /// Find a tweet by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tweet>> {
        let row = sqlx::query(
            r#"
            SELECT id, content, owner_id, created_at, updated_at
            FROM tweets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(tweet_from_row))
    }

    /// List a user's tweets newest-first as id/content projections
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<TweetSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, content
            FROM tweets
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        let tweets = rows
            .into_iter()
            .map(|row| TweetSummary {
                id: row.get("id"),
                content: row.get("content"),
            })
            .collect();

        Ok(tweets)
    }

    /// Replace a tweet's content; the owner is never reassigned
    pub async fn update_content(&self, id: Uuid, content: &str) -> Result<Option<Tweet>> {
        let row = sqlx::query(
            r#"
            UPDATE tweets
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, content, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(tweet_from_row))
    }

    /// Delete a tweet by ID, returning the deleted record
    pub async fn delete(&self, id: Uuid) -> Result<Option<Tweet>> {
        let row = sqlx::query(
            r#"
            DELETE FROM tweets
            WHERE id = $1
            RETURNING id, content, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(tweet_from_row))
    }
}

fn tweet_from_row(row: &PgRow) -> Tweet {
    Tweet {
        id: row.get("id"),
        content: row.get("content"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
