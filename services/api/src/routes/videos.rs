//! Video service routes

use axum::{
    Extension, Json, Router,
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
    routing::{get, patch, post},
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::video::{NewVideo, SortDirection, VideoListQuery, VideoSortField},
    response::{ApiResponse, Paged},
    state::AppState,
    validation::{clamp_limit, clamp_page, parse_id, require_text},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all-videos", get(list_videos))
        .route("/publish-video", post(publish_video))
        .route(
            "/:video_id",
            get(get_video).patch(update_video).delete(delete_video),
        )
        .route("/toggle/publish/:video_id", patch(toggle_publish))
}

/// Fields collected from the multipart video forms
#[derive(Default)]
struct VideoForm {
    title: Option<String>,
    description: Option<String>,
    video_file: Option<(String, Vec<u8>)>,
    thumbnail: Option<(String, Vec<u8>)>,
}

async fn collect_video_form(mut multipart: Multipart) -> Result<VideoForm, ApiError> {
    let mut form = VideoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "title" => {
                form.title = Some(field.text().await.map_err(|e| {
                    ApiError::Validation(format!("Failed to read title field: {}", e))
                })?);
            }
            "description" => {
                form.description = Some(field.text().await.map_err(|e| {
                    ApiError::Validation(format!("Failed to read description field: {}", e))
                })?);
            }
            "videoFile" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());
                let data = field.bytes().await.map_err(|e| {
                    ApiError::Validation(format!("Failed to read video file: {}", e))
                })?;
                form.video_file = Some((filename, data.to_vec()));
            }
            "thumbnail" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "thumbnail".to_string());
                let data = field.bytes().await.map_err(|e| {
                    ApiError::Validation(format!("Failed to read thumbnail file: {}", e))
                })?;
                form.thumbnail = Some((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// List an owner's videos with filtering, sorting, and pagination
pub async fn list_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoListQuery>,
) -> ApiResult<impl IntoResponse> {
    let user_id = query
        .user_id
        .as_deref()
        .ok_or_else(|| ApiError::Validation("userId is required".to_string()))?;
    let owner_id = parse_id(user_id, "user id")?;

    let user_exists = state.user_repository.exists(owner_id).await.map_err(|e| {
        error!("Failed to look up user: {}", e);
        ApiError::Internal
    })?;
    if !user_exists {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let sort_field = match query.sort_by.as_deref() {
        Some(name) => VideoSortField::parse(name)
            .ok_or_else(|| ApiError::Validation(format!("Unsupported sort field: {}", name)))?,
        None => VideoSortField::CreatedAt,
    };
    let sort_direction = match query.sort_type.as_deref() {
        Some(name) => SortDirection::parse(name)
            .ok_or_else(|| ApiError::Validation(format!("Unsupported sort order: {}", name)))?,
        None => SortDirection::Desc,
    };

    let page = clamp_page(query.page);
    let limit = clamp_limit(query.limit);
    let text_query = query
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let (items, total) = state
        .video_repository
        .list(owner_id, text_query, sort_field, sort_direction, page, limit)
        .await
        .map_err(|e| {
            error!("Failed to list videos: {}", e);
            ApiError::Internal
        })?;

    let paged = Paged {
        items,
        page,
        limit,
        total,
    };

    Ok(Json(ApiResponse::ok(paged, "Videos fetched successfully")))
}

/// Upload and publish a new video
pub async fn publish_video(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let form = collect_video_form(multipart).await?;

    let title = require_text(form.title.as_deref(), "Title")?;
    let description = require_text(form.description.as_deref(), "Description")?;

    let (video_name, video_data) = form.video_file.ok_or_else(|| {
        ApiError::Validation("Both video and thumbnail files are required".to_string())
    })?;
    let (thumbnail_name, thumbnail_data) = form.thumbnail.ok_or_else(|| {
        ApiError::Validation("Both video and thumbnail files are required".to_string())
    })?;

    // The two uploads are independent, so run them concurrently
    let (video_upload, thumbnail_upload) = tokio::join!(
        state.media_store.upload_video(&video_name, &video_data),
        state.media_store.upload_image(&thumbnail_name, &thumbnail_data),
    );

    let uploaded_video = video_upload.map_err(|e| {
        error!("Video upload failed: {}", e);
        ApiError::Upload("Video upload failed".to_string())
    })?;
    let thumbnail_url = thumbnail_upload.map_err(|e| {
        error!("Thumbnail upload failed: {}", e);
        ApiError::Upload("Thumbnail upload failed".to_string())
    })?;

    let video = state
        .video_repository
        .create(&NewVideo {
            title,
            description,
            video_url: uploaded_video.url,
            thumbnail_url,
            duration: uploaded_video.duration,
            owner_id: user.id,
        })
        .await
        .map_err(|e| {
            error!("Failed to create video record: {}", e);
            ApiError::Persistence("Video could not be created".to_string())
        })?;

    Ok(Json(ApiResponse::ok(video, "Video published successfully")))
}

/// Fetch a single video by ID
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&video_id, "video id")?;

    let video = state
        .video_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get video: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    Ok(Json(ApiResponse::ok(video, "Video fetched successfully")))
}

/// Update a video's title, description, or thumbnail (owner only)
pub async fn update_video(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&video_id, "video id")?;
    let form = collect_video_form(multipart).await?;

    let title = form
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let description = form
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    if title.is_none() && description.is_none() && form.thumbnail.is_none() {
        return Err(ApiError::Validation(
            "At least one of title, description, or thumbnail is required".to_string(),
        ));
    }

    let video = state
        .video_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get video: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    if video.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this video can update its details".to_string(),
        ));
    }

    let thumbnail_url = match form.thumbnail {
        Some((filename, data)) => Some(
            state
                .media_store
                .upload_image(&filename, &data)
                .await
                .map_err(|e| {
                    error!("Thumbnail upload failed: {}", e);
                    ApiError::Upload("Thumbnail upload failed".to_string())
                })?,
        ),
        None => None,
    };

    let updated = state
        .video_repository
        .update_details(id, title.as_deref(), description.as_deref(), thumbnail_url.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to update video: {}", e);
            ApiError::Persistence("Video details were not updated".to_string())
        })?
        .ok_or_else(|| ApiError::Persistence("Video details were not updated".to_string()))?;

    Ok(Json(ApiResponse::ok(updated, "Video details updated successfully")))
}

/// Delete a video (owner only)
pub async fn delete_video(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(video_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&video_id, "video id")?;

    let video = state
        .video_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get video: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    if video.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this video can delete it".to_string(),
        ));
    }

    let deleted = state
        .video_repository
        .delete(id)
        .await
        .map_err(|e| {
            error!("Failed to delete video: {}", e);
            ApiError::Persistence("Video was not deleted".to_string())
        })?
        .ok_or_else(|| ApiError::Persistence("Video was not deleted".to_string()))?;

    Ok(Json(ApiResponse::ok(deleted, "Video deleted successfully")))
}

/// Flip a video's publish flag (owner only)
pub async fn toggle_publish(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(video_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&video_id, "video id")?;

    let video = state
        .video_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get video: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    if video.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this video can change its publish status".to_string(),
        ));
    }

    let updated = state
        .video_repository
        .set_published(id, !video.is_published)
        .await
        .map_err(|e| {
            error!("Failed to toggle publish status: {}", e);
            ApiError::Persistence("Publish status was not updated".to_string())
        })?
        .ok_or_else(|| ApiError::Persistence("Publish status was not updated".to_string()))?;

    Ok(Json(ApiResponse::ok(updated, "Publish status changed successfully")))
}
