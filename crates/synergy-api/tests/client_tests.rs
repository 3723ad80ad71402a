//! Integration tests against a stub backend bound to a loopback port.
//!
//! The stub serves canned SynergySphere responses so the tests exercise the
//! real request path: URL construction, auth header, form encoding, error
//! body propagation, and the membership tag.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

use synergy_api::{ApiClient, ApiConfig, ApiError, analytics, auth, members, projects};
use synergy_types::api::LoginResponse;

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(ApiConfig::new(&format!("http://{addr}")).unwrap())
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[tokio::test]
async fn login_sends_form_encoded_credentials() {
    let app = Router::new().route(
        "/api/v1/auth/login",
        post(|Form(form): Form<LoginForm>| async move {
            assert_eq!(form.username, "alice@x.com");
            assert_eq!(form.password, "secret");
            Json(json!({
                "access_token": "t1",
                "token_type": "bearer",
                "user": {"id": 1, "email": "alice@x.com", "name": "Alice", "avatar_url": null}
            }))
        }),
    );
    let client = client_for(spawn(app).await);

    let resp: LoginResponse = auth::login(&client, "alice@x.com", "secret").await.unwrap();
    assert_eq!(resp.access_token, "t1");
    assert_eq!(resp.user.email, "alice@x.com");
}

#[tokio::test]
async fn bearer_token_and_no_cache_header_on_list_reads() {
    let app = Router::new().route(
        "/api/v1/projects",
        get(|headers: HeaderMap| async move {
            assert_eq!(headers["authorization"], "Bearer tok-9");
            assert_eq!(headers["cache-control"], "no-cache");
            Json(json!([]))
        }),
    );
    let client = client_for(spawn(app).await);

    let list = projects::list_projects(&client, "tok-9").await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn non_success_response_carries_raw_body_text() {
    let app = Router::new().route(
        "/api/v1/auth/me",
        get(|| async { (StatusCode::UNAUTHORIZED, "Invalid token") }),
    );
    let client = client_for(spawn(app).await);

    let err = auth::me(&client, "stale").await.unwrap_err();
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, "Invalid token");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn membership_rejection_is_tagged_not_stringly_matched_by_callers() {
    let app = Router::new().route(
        "/api/v1/projects/{id}/members",
        get(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({"detail": "Not a member of this project"})),
            )
        }),
    );
    let client = client_for(spawn(app).await);

    let err = members::list_members(&client, "tok", 5).await.unwrap_err();
    assert!(matches!(err, ApiError::MembershipRequired));
}

#[tokio::test]
async fn join_project_accepts_no_content() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/api/v1/projects/{id}/join",
            post(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::NO_CONTENT
            }),
        )
        .with_state(hits.clone());
    let client = client_for(spawn(app).await);

    projects::join_project(&client, "tok", 3).await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn leaderboard_parses_camel_case_rows() {
    let app = Router::new().route(
        "/api/v1/analytics/leaderboard/{id}",
        get(|| async {
            Json(json!([
                {"userId": 7, "name": "Alice", "avatar": null, "score": 4.0},
                {"userId": 8, "name": "Bob", "avatar": null, "score": 1.0}
            ]))
        }),
    );
    let client = client_for(spawn(app).await);

    let rows = analytics::leaderboard(&client, "tok", 1).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_id, 7);
    assert_eq!(rows[0].score, 4.0);
}
