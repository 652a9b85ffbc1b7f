//! Integration tests for the entity handlers
//!
//! These tests run the routers against a live PostgreSQL database
//! (schema applied via the workspace migrations) and exercise the
//! behavioral contracts of the video, comment, tweet, and playlist
//! services. The auth middleware is bypassed by injecting the principal
//! directly as a request extension.

use api::middleware::AuthUser;
use api::models::video::NewVideo;
use api::state::AppState;
use aws_config::BehaviorVersion;
use axum::{
    Extension, Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::database::{DatabaseConfig, init_pool};
use media::{MediaStore, MediaStoreConfig};
use serde_json::{Value, json};
use tower::util::ServiceExt;
use uuid::Uuid;

async fn test_state() -> AppState {
    let config = DatabaseConfig::from_env().expect("database config");
    let pool = init_pool(&config).await.expect("database pool");
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let media_store = MediaStore::new(
        aws_sdk_s3::Client::new(&aws_config),
        MediaStoreConfig::from_env(),
    );

    AppState::new(pool, media_store)
}

/// Router with the authenticated principal injected directly
fn test_router(state: AppState, user: AuthUser) -> Router {
    Router::new()
        .nest("/videos", api::routes::videos::router())
        .nest("/comments", api::routes::comments::router())
        .nest("/tweets", api::routes::tweets::router())
        .nest("/playlists", api::routes::playlists::router())
        .with_state(state)
        .layer(Extension(user))
}

async fn seed_user(state: &AppState) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO users (username, full_name, avatar_url)
         VALUES ($1, 'Test User', NULL)
         RETURNING id",
    )
    .bind(format!("user-{}", Uuid::new_v4()))
    .fetch_one(&state.db_pool)
    .await
    .expect("seed user")
}

async fn seed_video(state: &AppState, owner_id: Uuid, title: &str) -> api::models::video::Video {
    state
        .video_repository
        .create(&NewVideo {
            title: title.to_string(),
            description: format!("description of {}", title),
            video_url: format!("https://media.test/videos/{}.mp4", Uuid::new_v4()),
            thumbnail_url: format!("https://media.test/thumbnails/{}.jpg", Uuid::new_v4()),
            duration: Some(120.0),
            owner_id,
        })
        .await
        .expect("seed video")
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn owner_recorded_at_creation_matches_principal() {
    let state = test_state().await;
    let user_id = seed_user(&state).await;
    let router = test_router(state, AuthUser { id: user_id });

    let (status, body) = send(
        router,
        json_request("POST", "/tweets", json!({"content": "first post"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["owner_id"], json!(user_id.to_string()));
    assert_eq!(body["data"]["content"], json!("first post"));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn tweet_mutation_by_non_owner_is_forbidden() {
    let state = test_state().await;
    let owner_id = seed_user(&state).await;
    let other_id = seed_user(&state).await;

    let tweet = state
        .tweet_repository
        .create(owner_id, "mine")
        .await
        .expect("tweet");

    let router = test_router(state.clone(), AuthUser { id: other_id });
    let (status, _) = send(
        router,
        json_request(
            "PATCH",
            &format!("/tweets/{}", tweet.id),
            json!({"content": "hijacked"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let router = test_router(state.clone(), AuthUser { id: other_id });
    let (status, _) = send(router, empty_request("DELETE", &format!("/tweets/{}", tweet.id))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The tweet is untouched
    let kept = state
        .tweet_repository
        .find_by_id(tweet.id)
        .await
        .expect("lookup")
        .expect("still present");
    assert_eq!(kept.content, "mine");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn comment_requires_existing_video_and_content() {
    let state = test_state().await;
    let user_id = seed_user(&state).await;
    let video = seed_video(&state, user_id, "commented").await;

    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, _) = send(
        router,
        json_request(
            "POST",
            &format!("/comments/{}", Uuid::new_v4()),
            json!({"content": "hello"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let router = test_router(state, AuthUser { id: user_id });
    let (status, body) = send(
        router,
        json_request(
            "POST",
            &format!("/comments/{}", video.id),
            json!({"content": ""}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Content"));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn comment_pagination_returns_second_page() {
    // The original service accepted page/limit but never applied them;
    // this asserts the intended contract instead.
    let state = test_state().await;
    let user_id = seed_user(&state).await;
    let video = seed_video(&state, user_id, "paginated").await;

    for i in 0..15 {
        state
            .comment_repository
            .create(video.id, user_id, &format!("comment {}", i))
            .await
            .expect("comment");
    }

    let router = test_router(state, AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request("GET", &format!("/comments/{}?page=2&limit=10", video.id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"]["page"], json!(2));
    assert_eq!(body["data"]["limit"], json!(10));
    assert_eq!(body["data"]["total"], json!(15));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn toggle_publish_is_involution() {
    let state = test_state().await;
    let user_id = seed_user(&state).await;
    let video = seed_video(&state, user_id, "toggled").await;
    assert!(video.is_published);

    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request("PATCH", &format!("/videos/toggle/publish/{}", video.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_published"], json!(false));

    let router = test_router(state, AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request("PATCH", &format!("/videos/toggle/publish/{}", video.id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_published"], json!(true));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn playlist_round_trip_and_derived_thumbnail() {
    let state = test_state().await;
    let user_id = seed_user(&state).await;

    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(
        router,
        json_request("POST", "/playlists", json!({"name": "X", "description": "Y"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let playlist_id = body["data"]["id"].as_str().unwrap().to_string();

    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request("GET", &format!("/playlists/{}", playlist_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("X"));
    assert_eq!(body["data"]["description"], json!("Y"));
    assert_eq!(body["data"]["videos"], json!([]));

    // No videos yet: the derived thumbnail is null
    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request("GET", &format!("/playlists/user/{}", user_id)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let summary = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"].as_str() == Some(playlist_id.as_str()))
        .expect("created playlist listed")
        .clone();
    assert_eq!(summary["playlist_thumbnail"], Value::Null);

    // Adding a video makes its thumbnail the playlist thumbnail
    let video = seed_video(&state, user_id, "in playlist").await;
    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request(
            "PATCH",
            &format!("/playlists/add/{}/{}", playlist_id, video.id),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["videos"], json!([video.id.to_string()]));

    let router = test_router(state, AuthUser { id: user_id });
    let (_, body) = send(
        router,
        empty_request("GET", &format!("/playlists/user/{}", user_id)),
    )
    .await;
    let summary = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"].as_str() == Some(playlist_id.as_str()))
        .expect("playlist listed")
        .clone();
    assert_eq!(
        summary["playlist_thumbnail"],
        json!(video.thumbnail_url)
    );
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn add_video_to_playlist_is_idempotent() {
    let state = test_state().await;
    let user_id = seed_user(&state).await;
    let video = seed_video(&state, user_id, "repeated").await;
    let playlist = state
        .playlist_repository
        .create("dupes", "append-if-absent", user_id)
        .await
        .expect("playlist");

    for _ in 0..2 {
        let router = test_router(state.clone(), AuthUser { id: user_id });
        let (status, body) = send(
            router,
            empty_request(
                "PATCH",
                &format!("/playlists/add/{}/{}", playlist.id, video.id),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["videos"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn publish_with_missing_thumbnail_is_rejected_without_persisting() {
    let state = test_state().await;
    let user_id = seed_user(&state).await;

    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE owner_id = $1")
        .bind(user_id)
        .fetch_one(&state.db_pool)
        .await
        .expect("count");

    let boundary = "vidtube-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nMy clip\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\nA description\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"videoFile\"; filename=\"clip.mp4\"\r\n\
         Content-Type: video/mp4\r\n\r\nfake-bytes\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let request = Request::builder()
        .method("POST")
        .uri("/videos/publish-video")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("thumbnail"));

    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE owner_id = $1")
        .bind(user_id)
        .fetch_one(&state.db_pool)
        .await
        .expect("count");
    assert_eq!(before, after, "failed publish must persist nothing");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn delete_video_by_non_owner_is_forbidden() {
    let state = test_state().await;
    let owner_id = seed_user(&state).await;
    let other_id = seed_user(&state).await;
    let video = seed_video(&state, owner_id, "protected").await;

    let router = test_router(state.clone(), AuthUser { id: other_id });
    let (status, _) = send(router, empty_request("DELETE", &format!("/videos/{}", video.id))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let kept = state
        .video_repository
        .find_by_id(video.id)
        .await
        .expect("lookup");
    assert!(kept.is_some(), "video must survive a forbidden delete");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn video_listing_filters_sorts_and_paginates() {
    let state = test_state().await;
    let user_id = seed_user(&state).await;

    seed_video(&state, user_id, "alpha travel vlog").await;
    seed_video(&state, user_id, "beta cooking show").await;
    seed_video(&state, user_id, "gamma travel diary").await;

    // Unknown user fails before any query runs
    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, _) = send(
        router,
        empty_request("GET", &format!("/videos/all-videos?userId={}", Uuid::new_v4())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Text query matches title case-insensitively
    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request(
            "GET",
            &format!("/videos/all-videos?userId={}&query=TRAVEL", user_id),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], json!(2));
    for item in body["data"]["items"].as_array().unwrap() {
        assert_eq!(item["owner"]["full_name"], json!("Test User"));
    }

    // Sorted ascending by title, second page of size two
    let router = test_router(state.clone(), AuthUser { id: user_id });
    let (status, body) = send(
        router,
        empty_request(
            "GET",
            &format!(
                "/videos/all-videos?userId={}&sortBy=title&sortType=asc&page=2&limit=2",
                user_id
            ),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], json!("gamma travel diary"));

    // Unsupported sort field is rejected
    let router = test_router(state, AuthUser { id: user_id });
    let (status, _) = send(
        router,
        empty_request(
            "GET",
            &format!("/videos/all-videos?userId={}&sortBy=owner_id", user_id),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
