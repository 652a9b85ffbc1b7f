//! Playlist service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, patch, post},
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::playlist::CreatePlaylistRequest,
    response::ApiResponse,
    state::AppState,
    validation::{parse_id, require_text},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_playlist))
        .route("/user/:user_id", get(list_user_playlists))
        .route("/:playlist_id", get(get_playlist))
        .route("/add/:playlist_id/:video_id", patch(add_video_to_playlist))
}

/// Create an empty playlist owned by the requester
pub async fn create_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreatePlaylistRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = require_text(payload.name.as_deref(), "Name")?;
    let description = require_text(payload.description.as_deref(), "Description")?;

    let playlist = state
        .playlist_repository
        .create(&name, &description, user.id)
        .await
        .map_err(|e| {
            error!("Failed to create playlist: {}", e);
            ApiError::Persistence("Playlist could not be created".to_string())
        })?;

    Ok(Json(ApiResponse::ok(playlist, "Playlist created successfully")))
}

/// List a user's playlists with derived display thumbnails
pub async fn list_user_playlists(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&user_id, "user id")?;

    let user_exists = state.user_repository.exists(id).await.map_err(|e| {
        error!("Failed to look up user: {}", e);
        ApiError::Internal
    })?;
    if !user_exists {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let playlists = state
        .playlist_repository
        .list_by_owner(id)
        .await
        .map_err(|e| {
            error!("Failed to list playlists: {}", e);
            ApiError::Internal
        })?;

    Ok(Json(ApiResponse::ok(playlists, "Playlists fetched successfully")))
}

/// Fetch a playlist by ID with its ordered video references
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&playlist_id, "playlist id")?;

    let playlist = state
        .playlist_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get playlist: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Playlist not found".to_string()))?;

    Ok(Json(ApiResponse::ok(playlist, "Playlist fetched successfully")))
}

/// Append a video to a playlist if absent (owner only)
pub async fn add_video_to_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((playlist_id, video_id)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let playlist_id = parse_id(&playlist_id, "playlist id")?;
    let video_id = parse_id(&video_id, "video id")?;

    let playlist = state
        .playlist_repository
        .find_by_id(playlist_id)
        .await
        .map_err(|e| {
            error!("Failed to get playlist: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Playlist not found".to_string()))?;

    if playlist.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this playlist can add videos to it".to_string(),
        ));
    }

    let video = state
        .video_repository
        .find_by_id(video_id)
        .await
        .map_err(|e| {
            error!("Failed to get video: {}", e);
            ApiError::Internal
        })?;
    if video.is_none() {
        return Err(ApiError::NotFound("Video not found".to_string()));
    }

    state
        .playlist_repository
        .add_video(playlist_id, video_id)
        .await
        .map_err(|e| {
            error!("Failed to add video to playlist: {}", e);
            ApiError::Persistence("Video was not added to playlist".to_string())
        })?;

    let updated = state
        .playlist_repository
        .find_by_id(playlist_id)
        .await
        .map_err(|e| {
            error!("Failed to get playlist: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::Persistence("Video was not added to playlist".to_string()))?;

    Ok(Json(ApiResponse::ok(updated, "Video added to playlist successfully")))
}
