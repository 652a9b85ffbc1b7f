//! Playlist repository for database operations

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::playlist::{Playlist, PlaylistSummary};

/// Playlist repository for database operations
#[derive(Clone)]
pub struct PlaylistRepository {
    pool: PgPool,
}

impl PlaylistRepository {
    /// Create a new playlist repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new, empty playlist
    pub async fn create(&self, name: &str, description: &str, owner_id: Uuid) -> Result<Playlist> {
        let row = sqlx::query(
            r#"
            INSERT INTO playlists (name, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(playlist_from_row(&row, Vec::new()))
    }

    /// Find a playlist by ID together with its ordered video references
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, owner_id, created_at, updated_at
            FROM playlists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let video_rows = sqlx::query(
            r#"
            SELECT video_id
            FROM playlist_videos
            WHERE playlist_id = $1
            ORDER BY position
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let videos = video_rows
            .into_iter()
            .map(|row| row.get("video_id"))
            .collect();

        Ok(Some(playlist_from_row(&row, videos)))
    }

    /// List a user's playlists, each with a display thumbnail taken from
    /// the most recently created contained video (null when empty)
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<PlaylistSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, newest.thumbnail_url AS playlist_thumbnail
            FROM playlists p
            LEFT JOIN LATERAL (
                SELECT v.thumbnail_url
                FROM playlist_videos pv
                JOIN videos v ON v.id = pv.video_id
                WHERE pv.playlist_id = p.id
                ORDER BY v.created_at DESC
                LIMIT 1
            ) newest ON TRUE
            WHERE p.owner_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        let playlists = rows
            .into_iter()
            .map(|row| PlaylistSummary {
                id: row.get("id"),
                name: row.get("name"),
                description: row.get("description"),
                playlist_thumbnail: row.get("playlist_thumbnail"),
            })
            .collect();

        Ok(playlists)
    }

    /// Append a video at the end of a playlist if it is not already a
    /// member. Idempotent.
    pub async fn add_video(&self, playlist_id: Uuid, video_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO playlist_videos (playlist_id, video_id, position)
            SELECT $1, $2, COALESCE(MAX(position) + 1, 0)
            FROM playlist_videos
            WHERE playlist_id = $1
            ON CONFLICT (playlist_id, video_id) DO NOTHING
            "#,
        )
        .bind(playlist_id)
        .bind(video_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn playlist_from_row(row: &PgRow, videos: Vec<Uuid>) -> Playlist {
    Playlist {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        owner_id: row.get("owner_id"),
        videos,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
