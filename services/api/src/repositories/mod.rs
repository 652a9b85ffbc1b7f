//! Repositories for database operations

pub mod comment;
pub mod playlist;
pub mod tweet;
pub mod user;
pub mod video;

pub use comment::CommentRepository;
pub use playlist::PlaylistRepository;
pub use tweet::TweetRepository;
pub use user::UserRepository;
pub use video::VideoRepository;
