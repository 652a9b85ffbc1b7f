//! Tweet service routes

use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::tweet::TweetRequest,
    response::ApiResponse,
    state::AppState,
    validation::{parse_id, require_text},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_tweet)).route(
        "/:id",
        get(list_user_tweets).patch(update_tweet).delete(delete_tweet),
    )
}

/// Create a tweet owned by the requester
pub async fn create_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<TweetRequest>,
) -> ApiResult<impl IntoResponse> {
    let content = require_text(payload.content.as_deref(), "Content")?;

    let tweet = state
        .tweet_repository
        .create(user.id, &content)
        .await
        .map_err(|e| {
            error!("Failed to create tweet: {}", e);
            ApiError::Persistence("Tweet could not be created".to_string())
        })?;

    Ok(Json(ApiResponse::ok(tweet, "Tweet created successfully")))
}

/// List a user's tweets as id/content projections
pub async fn list_user_tweets(
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

    // An empty list is success, not an error
    let tweets = state.tweet_repository.list_by_owner(id).await.map_err(|e| {
        error!("Failed to list tweets: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(ApiResponse::ok(tweets, "Tweets fetched successfully")))
}

/// Update a tweet's content (owner only)
pub async fn update_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tweet_id): Path<String>,
    Json(payload): Json<TweetRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&tweet_id, "tweet id")?;
    let content = require_text(payload.content.as_deref(), "Content")?;

    let tweet = state
        .tweet_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get tweet: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Tweet not found".to_string()))?;

    if tweet.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this tweet can update it".to_string(),
        ));
    }

    let updated = state
        .tweet_repository
        .update_content(id, &content)
        .await
        .map_err(|e| {
            error!("Failed to update tweet: {}", e);
            ApiError::Persistence("Tweet was not updated".to_string())
        })?
        .ok_or_else(|| ApiError::Persistence("Tweet was not updated".to_string()))?;

    Ok(Json(ApiResponse::ok(updated, "Tweet updated successfully")))
}

/// Delete a tweet (owner only)
pub async fn delete_tweet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(tweet_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(&tweet_id, "tweet id")?;

    let tweet = state
        .tweet_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get tweet: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Tweet not found".to_string()))?;

    if tweet.owner_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the owner of this tweet can delete it".to_string(),
        ));
    }

    let deleted = state
        .tweet_repository
        .delete(id)
        .await
        .map_err(|e| {
            error!("Failed to delete tweet: {}", e);
            ApiError::Persistence("Tweet was not deleted".to_string())
        })?
        .ok_or_else(|| ApiError::Persistence("Tweet was not deleted".to_string()))?;

    Ok(Json(ApiResponse::ok(deleted, "Tweet deleted successfully")))
}
