//! Comment service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, patch},
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::comment::{CommentListQuery, CommentRequest},
    response::{ApiResponse, Paged},
    state::AppState,
    validation::{clamp_limit, clamp_page, parse_id, require_text},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:video_id", get(list_comments).post(add_comment))
        .route("/c/:comment_id", patch(update_comment).delete(delete_comment))
}

/// List a video's comments, paginated, joined with author usernames
pub async fn list_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    Query(query): Query<CommentListQuery>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&video_id, "video id")?;

    let video = state.video_repository.find_by_id(id).await.map_err(|e| {
        error!("Failed to get video: {}", e);
        ApiError::Internal
    })?;
    if video.is_none() {
        return Err(ApiError::NotFound("Video not found".to_string()));
    }

    let page = clamp_page(query.page);
    let limit = clamp_limit(query.limit);

    // An empty result set is success, not an error
    let (items, total) = state
        .comment_repository
        .list_for_video(id, page, limit)
        .await
        .map_err(|e| {
            error!("Failed to list comments: {}", e);
            ApiError::Internal
        })?;

    let paged = Paged {
        items,
        page,
        limit,
        total,
    };

    Ok(Json(ApiResponse::ok(paged, "Comments fetched successfully")))
}

/// Add a comment to an existing video
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(video_id): Path<String>,
    Json(payload): Json<CommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&video_id, "video id")?;
    let content = require_text(payload.content.as_deref(), "Content")?;

    let video = state.video_repository.find_by_id(id).await.map_err(|e| {
        error!("Failed to get video: {}", e);
        ApiError::Internal
    })?;
    if video.is_none() {
        return Err(ApiError::NotFound("Video not found".to_string()));
    }

    let comment = state
        .comment_repository
        .create(id, user.id, &content)
        .await
        .map_err(|e| {
            error!("Failed to create comment: {}", e);
            ApiError::Persistence("Comment could not be added".to_string())
        })?;

    Ok(Json(ApiResponse::ok(comment, "Comment added successfully")))
}

/// Update a comment's content (owner only)
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(comment_id): Path<String>,
    Json(payload): Json<CommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&comment_id, "comment id")?;
    let content = require_text(payload.content.as_deref(), "Content")?;

    let comment = state
        .comment_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get comment: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    if comment.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this comment can update it".to_string(),
        ));
    }

    let updated = state
        .comment_repository
        .update_content(id, &content)
        .await
        .map_err(|e| {
            error!("Failed to update comment: {}", e);
            ApiError::Persistence("Comment was not updated".to_string())
        })?
        .ok_or_else(|| ApiError::Persistence("Comment was not updated".to_string()))?;

    Ok(Json(ApiResponse::ok(updated, "Comment updated successfully")))
}

/// Delete a comment (owner only)
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(comment_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&comment_id, "comment id")?;

    let comment = state
        .comment_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get comment: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    if comment.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this comment can delete it".to_string(),
        ));
    }

    let deleted = state
        .comment_repository
        .delete(id)
        .await
        .map_err(|e| {
            error!("Failed to delete comment: {}", e);
            ApiError::Persistence("Comment was not deleted".to_string())
        })?
        .ok_or_else(|| ApiError::Persistence("Comment was not deleted".to_string()))?;

    Ok(Json(ApiResponse::ok(deleted, "Comment deleted successfully")))
}
