use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bookshelf::testing::TestApp;
use bookshelf::ProfileView;
use bookshelf_api::{ApiError, Request};
use bookshelf_auth::{KeyValueStore, ProfileRefresh};
use serde_json::{json, Value};

const TOKEN: &str = "T1";

fn is_authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Authentication credentials were not provided."})),
    )
        .into_response()
}

async fn obtain_token(Json(body): Json<Value>) -> Response {
    if body["username"] == "alice" && body["password"] == "secret" {
        Json(json!({"access": TOKEN, "refresh": "R1"})).into_response()
    } else {
        unauthorized()
    }
}

async fn profile(Path(username): Path<String>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"id": 1, "username": username, "followings": [], "followers": []})).into_response()
}

async fn follow(Path(user_id): Path<u64>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    // alice is user 1
    if user_id == 1 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "self follow not allowed"})),
        )
            .into_response();
    }
    Json(json!({"followed": true})).into_response()
}

async fn list_books() -> Json<Value> {
    Json(json!([{
        "isbn13": "9780000000001",
        "title": "Test Book",
        "author": "Test Author",
        "publisher": "Test Publisher",
        "cover": "http://example.com/cover.jpg",
        "descriptions": "Test Descriptions"
    }]))
}

async fn create_thread(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !is_authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 1,
            "user": {"id": 1, "username": "alice"},
            "book": body["book_isbn13"],
            "book_title": "Test Book",
            "title": body["title"],
            "rating": body["rating"],
            "created_at": "2025-01-02T03:04:05Z",
            "like_count": 0,
            "comment_count": 0
        })),
    )
        .into_response()
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/accounts/api/token/", post(obtain_token))
        .route("/accounts/profile/{username}/", get(profile))
        .route("/accounts/follow/{user_id}/", post(follow))
        .route("/api/v1/books/", get(list_books))
        .route("/api/v1/community/threads/", post(create_thread));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_protected_views_follow_login_and_logout() {
    let host = spawn_backend().await;
    let app = TestApp::new(&host);

    app.assert_redirected_to_login("/community/create");
    app.assert_redirected_to_login("/profile/alice");
    app.assert_proceeds("/community", "community");

    let outcome = app.app().store().login("alice", "secret").await.unwrap();
    assert!(outcome.profile.is_loaded());

    app.assert_proceeds("/community/create", "thread-create");
    app.assert_proceeds("/profile/alice", "profile");

    app.app().store().logout();

    app.assert_redirected_to_login("/community/create");
    app.assert_redirected_to_login("/profile/alice");
}

#[tokio::test]
async fn test_failed_login_keeps_views_locked() {
    let host = spawn_backend().await;
    let app = TestApp::new(&host);

    assert!(app.app().store().login("alice", "nope").await.is_err());

    app.assert_redirected_to_login("/community/create");
}

#[tokio::test]
async fn test_restart_keeps_access_to_protected_views() {
    let host = spawn_backend().await;
    let first = TestApp::new(&host);
    first.app().store().login("alice", "secret").await.unwrap();

    let restarted = TestApp::with_storage(&host, first.storage());

    assert!(restarted.app().session().is_authenticated());
    assert_eq!(
        restarted.app().session().user().map(|u| u.username),
        Some("alice".to_string())
    );
    restarted.assert_proceeds("/profile/alice", "profile");
}

#[tokio::test]
async fn test_public_api_calls_work_without_session() {
    let host = spawn_backend().await;
    let app = TestApp::new(&host);

    let books = app.app().client().send(Request::books().list()).await.unwrap();

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].isbn13, "9780000000001");
}

#[tokio::test]
async fn test_api_calls_carry_session_token() {
    let host = spawn_backend().await;
    let app = TestApp::new(&host);
    let request = || {
        Request::community()
            .create_thread("9780000000001", "My Review", "Great book!")
            .rating(5)
    };

    let err = app.app().client().send(request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));

    app.app().store().login("alice", "secret").await.unwrap();

    let thread = app.app().client().send(request()).await.unwrap();
    assert_eq!(thread.title, "My Review");
    assert_eq!(thread.rating, 5);
    assert_eq!(thread.book, "9780000000001");
}

#[tokio::test]
async fn test_viewing_another_profile_keeps_session_user() {
    let host = spawn_backend().await;
    let app = TestApp::new(&host);
    app.app().store().login("alice", "secret").await.unwrap();

    let view = app.app().view_profile("bob").await.unwrap();

    match view {
        ProfileView::Other(profile) => assert_eq!(profile.username, "bob"),
        other => panic!("expected another user's profile, got {:?}", other),
    }
    assert_eq!(
        app.app().session().user().map(|u| u.username),
        Some("alice".to_string())
    );
    let stored = app.storage().get("user").unwrap().unwrap();
    assert!(stored.contains("\"alice\""));
}

#[tokio::test]
async fn test_viewing_own_profile_refreshes_session() {
    let host = spawn_backend().await;
    let app = TestApp::new(&host);
    app.app().store().login("alice", "secret").await.unwrap();

    let view = app.app().view_profile("alice").await.unwrap();

    assert!(matches!(view, ProfileView::Own(ProfileRefresh::Loaded(_))));
    assert_eq!(
        app.app().session().user().map(|u| u.username),
        Some("alice".to_string())
    );
}

#[tokio::test]
async fn test_follow_requires_session() {
    let host = spawn_backend().await;
    let app = TestApp::new(&host);

    let err = app
        .app()
        .client()
        .send(Request::accounts().follow(2))
        .await
        .unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));

    app.app().store().login("alice", "secret").await.unwrap();

    let status = app.app().client().send(Request::accounts().follow(2)).await.unwrap();
    assert!(status.followed);

    let err = app
        .app()
        .client()
        .send(Request::accounts().follow(1))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "(400 Bad Request) self follow not allowed");
}
