//! Tweet models for the API service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tweet entity
#[derive(Debug, Clone, Serialize)]
pub struct Tweet {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection returned by the per-user tweet listing
#[derive(Debug, Clone, Serialize)]
pub struct TweetSummary {
    pub id: Uuid,
    pub content: String,
}

/// Request body for creating or updating a tweet
#[derive(Debug, Clone, Deserialize)]
pub struct TweetRequest {
    pub content: Option<String>,
}
