//! Media storage library for the VidTube backend
//!
//! Uploads video and thumbnail files to S3 and reports the probed
//! duration of uploaded videos. The API service consumes this as its
//! media-hosting capability.

pub mod metadata;
pub mod store;

pub use store::{MediaStore, MediaStoreConfig, UploadedMedia};
