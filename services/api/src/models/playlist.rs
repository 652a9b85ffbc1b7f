//! Playlist models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Playlist entity with its ordered video references
#[derive(Debug, Clone, Serialize)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub videos: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection for the per-user playlist listing; the thumbnail is
/// derived from the most recently created contained video
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub playlist_thumbnail: Option<String>,
}

/// Request body for creating a playlist
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}
