//! Comment models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub video_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with its author's username for list views
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub username: String,
}

/// Request body for creating or updating a comment
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    pub content: Option<String>,
}

/// Query parameters for comment listing
#[derive(Debug, Clone, Deserialize)]
pub struct CommentListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
