//! S3-backed media store
//!
//! Uploads media bytes to S3 buckets and returns publicly reachable
//! URLs. Videos are probed for their duration before upload.

use crate::metadata;
use anyhow::Result;
use aws_sdk_s3::{Client, primitives::ByteStream};
use std::env;
use tracing::info;
use uuid::Uuid;

/// Configuration for the media store
#[derive(Debug, Clone)]
pub struct MediaStoreConfig {
    /// Bucket that holds uploaded video files
    pub media_bucket: String,
    /// Bucket that holds thumbnail images
    pub thumbnail_bucket: String,
    /// Base URL under which bucket objects are served
    pub public_base_url: String,
}

impl MediaStoreConfig {
    /// Create a new MediaStoreConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MEDIA_BUCKET_NAME`: bucket for video files (default: "media-bucket")
    /// - `THUMBNAIL_BUCKET_NAME`: bucket for thumbnails (default: "thumbnail-bucket")
    /// - `MEDIA_PUBLIC_BASE_URL`: public URL prefix (default: "https://media.vidtube.dev")
    pub fn from_env() -> Self {
        let media_bucket =
            env::var("MEDIA_BUCKET_NAME").unwrap_or_else(|_| "media-bucket".to_string());
        let thumbnail_bucket =
            env::var("THUMBNAIL_BUCKET_NAME").unwrap_or_else(|_| "thumbnail-bucket".to_string());
        let public_base_url = env::var("MEDIA_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "https://media.vidtube.dev".to_string());

        MediaStoreConfig {
            media_bucket,
            thumbnail_bucket,
            public_base_url,
        }
    }
}

/// Result of a successful video upload
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    /// Public URL of the stored file
    pub url: String,
    /// Duration in seconds, as reported by the media probe
    pub duration: Option<f64>,
}

/// S3-backed media store
#[derive(Clone)]
pub struct MediaStore {
    s3_client: Client,
    config: MediaStoreConfig,
}

impl MediaStore {
    pub fn new(s3_client: Client, config: MediaStoreConfig) -> Self {
        Self { s3_client, config }
    }

    /// Upload a video file and report its probed duration
    pub async fn upload_video(&self, filename: &str, data: &[u8]) -> Result<UploadedMedia> {
        let key = object_key("videos", filename);

        // ffprobe reads from the filesystem, so stage the bytes in a temp file
        let temp_path = format!("/tmp/{}", key.replace('/', "-"));
        tokio::fs::write(&temp_path, data).await?;

        let duration = metadata::extract_duration(&temp_path).await;
        tokio::fs::remove_file(&temp_path).await?;
        let duration = duration?;

        info!("Uploading video to S3: {}", key);
        self.put_object(&self.config.media_bucket, &key, data, video_content_type(filename))
            .await?;

        Ok(UploadedMedia {
            url: self.public_url(&self.config.media_bucket, &key),
            duration,
        })
    }

    /// Upload a thumbnail image, returning its public URL
    pub async fn upload_image(&self, filename: &str, data: &[u8]) -> Result<String> {
        let key = object_key("thumbnails", filename);

        info!("Uploading thumbnail to S3: {}", key);
        self.put_object(
            &self.config.thumbnail_bucket,
            &key,
            data,
            image_content_type(filename),
        )
        .await?;

        Ok(self.public_url(&self.config.thumbnail_bucket, &key))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<()> {
        let byte_stream = ByteStream::from(data.to_vec());

        self.s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(byte_stream)
            .content_type(content_type)
            .send()
            .await?;

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.config.public_base_url, bucket, key)
    }
}

/// Build a unique object key, preserving the original file extension
fn object_key(prefix: &str, filename: &str) -> String {
    match file_extension(filename) {
        Some(ext) => format!("{}/{}.{}", prefix, Uuid::new_v4(), ext),
        None => format!("{}/{}", prefix, Uuid::new_v4()),
    }
}

fn file_extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains('/'))
}

fn video_content_type(filename: &str) -> &'static str {
    match file_extension(filename) {
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        _ => "video/mp4",
    }
}

fn image_content_type(filename: &str) -> &'static str {
    match file_extension(filename) {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}
