//! API service for the VidTube backend
//!
//! REST handlers for videos, comments, tweets, and playlists over
//! PostgreSQL, with JWT-verified principals and S3-backed media
//! uploads.

pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod state;
pub mod validation;
