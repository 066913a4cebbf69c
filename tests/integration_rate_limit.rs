mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{bearer_for, create_test_user, generate_unique_email, test_app_state};
use contactly::config::rate_limit::RateLimitConfig;
use contactly::router::init_router;
use sqlx::PgPool;
use tower::ServiceExt;

/// App with a strict limiter: one request per minute on `/api/users`.
async fn setup_strict_app(pool: PgPool) -> axum::Router {
    let mut state = test_app_state(pool);
    state.rate_limit_config = RateLimitConfig {
        users_per_second: 60,
        users_burst_size: 1,
    };
    init_router(state)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_users_route_rate_limit_exceeded(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_strict_app(pool.clone()).await;

    let request1 = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", bearer_for(user.id))
        .header("x-forwarded-for", "192.168.1.100")
        .body(Body::empty())
        .unwrap();

    let response1 = app.clone().oneshot(request1).await.unwrap();
    assert_eq!(response1.status(), StatusCode::OK);

    let request2 = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", bearer_for(user.id))
        .header("x-forwarded-for", "192.168.1.100")
        .body(Body::empty())
        .unwrap();

    let response2 = app.oneshot(request2).await.unwrap();
    assert_eq!(response2.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_different_ips_have_separate_limits(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_strict_app(pool.clone()).await;

    for ip in ["10.0.0.1", "10.0.0.2"] {
        let request = Request::builder()
            .method("GET")
            .uri("/api/users/me")
            .header("authorization", bearer_for(user.id))
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_contacts_routes_not_rate_limited(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_strict_app(pool.clone()).await;

    // The strict bucket applies only under /api/users.
    for _ in 0..3 {
        let request = Request::builder()
            .method("GET")
            .uri("/api/contacts/")
            .header("authorization", bearer_for(user.id))
            .header("x-forwarded-for", "192.168.1.100")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
