//! Router-level tests for the session guard
//!
//! Uses a lazy pool so no route here ever opens a database connection;
//! every request is answered by the guard before a handler would run.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use gymdesk_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, GymConfig, SessionConfig},
};
use gymdesk_shared::auth::session::{create_token, Role};
use gymdesk_shared::clock::SystemClock;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret-32-bytes-min!!";

fn test_router() -> axum::Router {
    let db = PgPool::connect_lazy("postgresql://localhost/gymdesk_test")
        .expect("lazy pool never connects eagerly");
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        },
        session: SessionConfig {
            secret: SECRET.to_string(),
        },
        gym: GymConfig { utc_offset_hours: 8 },
    };
    build_router(AppState {
        db,
        config: Arc::new(config),
        clock: Arc::new(SystemClock::default()),
    })
}

fn cookie_for(role: Role) -> String {
    let token = create_token(
        uuid::Uuid::new_v4(),
        role,
        "tester",
        SECRET,
        chrono::Utc::now(),
    )
    .expect("token signs");
    format!("session={token}")
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect carries a location")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn unauthenticated_admin_path_redirects_to_login() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/admin/dashboard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn unauthenticated_member_path_redirects_to_login() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/member/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn member_on_admin_path_is_sent_to_member_dashboard() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/admin/dashboard")
                .header(header::COOKIE, cookie_for(Role::Member))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/member/dashboard");
}

#[tokio::test]
async fn admin_on_member_path_is_sent_to_admin_dashboard() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/member/workouts")
                .header(header::COOKIE, cookie_for(Role::Admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");
}

#[tokio::test]
async fn logged_in_admin_on_login_page_is_sent_home() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/login")
                .header(header::COOKIE, cookie_for(Role::Admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/dashboard");
}

#[tokio::test]
async fn garbage_cookie_is_treated_as_logged_out() {
    let response = test_router()
        .oneshot(
            Request::builder()
                .uri("/admin/dashboard")
                .header(header::COOKIE, "session=not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn health_is_public() {
    let response = test_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_page_is_public_when_logged_out() {
    let response = test_router()
        .oneshot(Request::builder().uri("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
