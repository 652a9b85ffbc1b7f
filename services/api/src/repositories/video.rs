//! Video repository for database operations

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::video::{
    NewVideo, SortDirection, Video, VideoListItem, VideoOwner, VideoSortField,
};

const VIDEO_COLUMNS: &str = "id, title, description, video_url, thumbnail_url, duration, \
     is_published, owner_id, created_at, updated_at";

/// Video repository for database operations
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    /// Create a new video repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new video record, published immediately
    pub async fn create(&self, new_video: &NewVideo) -> Result<Video> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO videos (title, description, video_url, thumbnail_url, duration, is_published, owner_id)
            VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            RETURNING {VIDEO_COLUMNS}
            "#,
        ))
        .bind(&new_video.title)
        .bind(&new_video.description)
        .bind(&new_video.video_url)
        .bind(&new_video.thumbnail_url)
        .bind(new_video.duration)
        .bind(new_video.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(video_from_row(&row))
    }

    /// Find a video by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let row = sqlx::query(&format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(video_from_row))
    }

    /// List an owner's videos with text filtering, sorting, and
    /// pagination, each enriched with the owner's public profile
    pub async fn list(
        &self,
        owner_id: Uuid,
        text_query: Option<&str>,
        sort_field: VideoSortField,
        sort_direction: SortDirection,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<VideoListItem>, i64)> {
        let offset = (page - 1) as i64 * limit as i64;
        let sql = build_list_sql(text_query.is_some(), sort_field, sort_direction);

        let mut query = sqlx::query(&sql).bind(owner_id);
        let pattern = text_query.map(|q| format!("%{}%", q));
        if let Some(pattern) = &pattern {
            query = query.bind(pattern);
        }
        let rows = query
            .bind(limit as i64)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let count_sql = build_count_sql(text_query.is_some());
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(owner_id);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let items = rows
            .iter()
            .map(|row| VideoListItem {
                id: row.get("id"),
                title: row.get("title"),
                description: row.get("description"),
                video_url: row.get("video_url"),
                thumbnail_url: row.get("thumbnail_url"),
                duration: row.get("duration"),
                is_published: row.get("is_published"),
                created_at: row.get("created_at"),
                owner: VideoOwner {
                    username: row.get("username"),
                    full_name: row.get("full_name"),
                    avatar_url: row.get("avatar_url"),
                },
            })
            .collect();

        Ok((items, total))
    }

    /// Apply the provided detail fields, leaving absent ones untouched
    pub async fn update_details(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        thumbnail_url: Option<&str>,
    ) -> Result<Option<Video>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE videos
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                thumbnail_url = COALESCE($4, thumbnail_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(thumbnail_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(video_from_row))
    }

    /// Set the publish flag without touching any other field
    pub async fn set_published(&self, id: Uuid, is_published: bool) -> Result<Option<Video>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE videos
            SET is_published = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(is_published)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(video_from_row))
    }

    /// Delete a video by ID, returning the deleted record
    pub async fn delete(&self, id: Uuid) -> Result<Option<Video>> {
        let row = sqlx::query(&format!(
            "DELETE FROM videos WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(video_from_row))
    }
}

fn video_from_row(row: &PgRow) -> Video {
    Video {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        video_url: row.get("video_url"),
        thumbnail_url: row.get("thumbnail_url"),
        duration: row.get("duration"),
        is_published: row.get("is_published"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Build the listing query from the filter parameters
///
/// Pure function: the stages (owner match, text match, owner join, sort,
/// pagination) are assembled once per request, with no shared builder
/// state. Sort column and direction come from whitelisted enums, never
/// from caller input.
fn build_list_sql(
    with_text_query: bool,
    sort_field: VideoSortField,
    sort_direction: SortDirection,
) -> String {
    let mut sql = String::from(
        "SELECT v.id, v.title, v.description, v.video_url, v.thumbnail_url, \
         v.duration, v.is_published, v.created_at, \
         u.username, u.full_name, u.avatar_url \
         FROM videos v \
         JOIN users u ON u.id = v.owner_id \
         WHERE v.owner_id = $1",
    );

    let mut next_bind = 2;
    if with_text_query {
        sql.push_str(&format!(
            " AND (v.title ILIKE ${n} OR v.description ILIKE ${n})",
            n = next_bind
        ));
        next_bind += 1;
    }

    sql.push_str(&format!(
        " ORDER BY v.{} {} LIMIT ${} OFFSET ${}",
        sort_field.column(),
        sort_direction.sql(),
        next_bind,
        next_bind + 1
    ));

    sql
}

fn build_count_sql(with_text_query: bool) -> String {
    let mut sql = String::from("SELECT COUNT(*) FROM videos v WHERE v.owner_id = $1");
    if with_text_query {
        sql.push_str(" AND (v.title ILIKE $2 OR v.description ILIKE $2)");
    }
    sql
}
