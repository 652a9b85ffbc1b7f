//! Application state shared across handlers

use media::MediaStore;
use sqlx::PgPool;

use crate::repositories::{
    CommentRepository, PlaylistRepository, TweetRepository, UserRepository, VideoRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repository: UserRepository,
    pub video_repository: VideoRepository,
    pub comment_repository: CommentRepository,
    pub tweet_repository: TweetRepository,
    pub playlist_repository: PlaylistRepository,
    pub media_store: MediaStore,
}

impl AppState {
    /// Build the state from a connection pool and a media store
    pub fn new(db_pool: PgPool, media_store: MediaStore) -> Self {
        Self {
            user_repository: UserRepository::new(db_pool.clone()),
            video_repository: VideoRepository::new(db_pool.clone()),
            comment_repository: CommentRepository::new(db_pool.clone()),
            tweet_repository: TweetRepository::new(db_pool.clone()),
            playlist_repository: PlaylistRepository::new(db_pool.clone()),
            db_pool,
            media_store,
        }
    }
}
