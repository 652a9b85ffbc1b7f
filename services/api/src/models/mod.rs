//! API models for entities and request/response payloads

pub mod comment;
pub mod playlist;
pub mod tweet;
pub mod video;
