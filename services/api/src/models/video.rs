//! Video models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Video entity
#[derive(Debug, Clone, Serialize)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: Option<f64>,
    pub is_published: bool,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New video creation payload
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: Option<f64>,
    pub owner_id: Uuid,
}

/// Public profile fields of a video's owner, joined into list results
#[derive(Debug, Clone, Serialize)]
pub struct VideoOwner {
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Video enriched with its owner's public profile
#[derive(Debug, Clone, Serialize)]
pub struct VideoListItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: Option<f64>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub owner: VideoOwner,
}

/// Query parameters for video listing
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Number of items per page
    pub limit: Option<u32>,
    /// Case-insensitive text search over title and description
    pub query: Option<String>,
    /// Sort field
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// Sort order (asc or desc)
    #[serde(rename = "sortType")]
    pub sort_type: Option<String>,
    /// Owner whose videos are listed
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Whitelisted sort fields for video listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSortField {
    CreatedAt,
    Title,
    Duration,
}

impl VideoSortField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" | "createdAt" => Some(Self::CreatedAt),
            "title" => Some(Self::Title),
            "duration" => Some(Self::Duration),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Title => "title",
            Self::Duration => "duration",
        }
    }
}

/// Sort direction for video listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
