mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use common::{bearer_for, create_test_contact, create_test_user, generate_unique_email, setup_test_app};
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn contact_payload(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "first_name": "John",
        "last_name": "Doe",
        "email": email,
        "phone": phone,
        "birthday": "1990-06-15",
        "extra_info": "met at a conference"
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_contact(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/contacts/")
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(
            contact_payload("john@example.com", "+1234567890").to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["first_name"], "John");
    assert_eq!(body["email"], "john@example.com");
    assert_eq!(body["user_id"], user.id.to_string());
    assert!(body.get("id").is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_contact_duplicate_email(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let first = Request::builder()
        .method("POST")
        .uri("/api/contacts/")
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(
            contact_payload("dup@example.com", "+1111111111").to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(first).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same email, different phone.
    let second = Request::builder()
        .method("POST")
        .uri("/api/contacts/")
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(
            contact_payload("dup@example.com", "+2222222222").to_string(),
        ))
        .unwrap();
    let response = app.oneshot(second).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_contact_allowed_for_different_owners(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let alice = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let bob = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    for user_id in [alice.id, bob.id] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/contacts/")
            .header("content-type", "application/json")
            .header("authorization", bearer_for(user_id))
            .body(Body::from(
                contact_payload("shared@example.com", "+1234567890").to_string(),
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_contact_invalid_email(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/contacts/")
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(
            contact_payload("not-an-email", "+1234567890").to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_contacts_require_auth(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/contacts/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_contacts_pagination(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let birthday = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    for name in ["Anna", "Ben", "Cleo"] {
        create_test_contact(&mut tx, user.id, name, birthday).await;
    }
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/contacts/?limit=2&offset=0")
        .header("authorization", bearer_for(user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);

    let request = Request::builder()
        .method("GET")
        .uri("/api/contacts/?limit=2&offset=2")
        .header("authorization", bearer_for(user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_contacts_scoped_to_owner(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let alice = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let bob = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let birthday = NaiveDate::from_ymd_opt(1985, 3, 2).unwrap();
    create_test_contact(&mut tx, alice.id, "Mine", birthday).await;
    create_test_contact(&mut tx, bob.id, "Theirs", birthday).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/contacts/")
        .header("authorization", bearer_for(alice.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let contacts = body.as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["first_name"], "Mine");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_contact_not_owned_is_404(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let alice = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let bob = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let birthday = NaiveDate::from_ymd_opt(1985, 3, 2).unwrap();
    let contact = create_test_contact(&mut tx, bob.id, "Hidden", birthday).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/contacts/{}", contact.id))
        .header("authorization", bearer_for(alice.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_contact_partial(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let birthday = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    let contact = create_test_contact(&mut tx, user.id, "Original", birthday).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/contacts/{}", contact.id))
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(json!({ "first_name": "Renamed" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["first_name"], "Renamed");
    // Untouched fields are preserved.
    assert_eq!(body["last_name"], "Tester");
    assert_eq!(body["email"], contact.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_contact_duplicate_email_conflict(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let birthday = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    let first = create_test_contact(&mut tx, user.id, "First", birthday).await;
    let second = create_test_contact(&mut tx, user.id, "Second", birthday).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    // Taking another contact's email is rejected.
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/contacts/{}", first.id))
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(json!({ "email": second.email }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Re-submitting the contact's own email and phone is not a conflict.
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/contacts/{}", first.id))
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(
            json!({ "email": first.email, "phone": first.phone }).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["email"], first.email);
    assert_eq!(body["phone"], first.phone);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_contact_missing_is_404(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/contacts/{}", Uuid::new_v4()))
        .header("content-type", "application/json")
        .header("authorization", bearer_for(user.id))
        .body(Body::from(json!({ "first_name": "Ghost" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_contact(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let birthday = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    let contact = create_test_contact(&mut tx, user.id, "Doomed", birthday).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/contacts/{}", contact.id))
        .header("authorization", bearer_for(user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/contacts/{}", contact.id))
        .header("authorization", bearer_for(user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_contacts(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let other = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;
    let birthday = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    create_test_contact(&mut tx, user.id, "Johnathan", birthday).await;
    create_test_contact(&mut tx, user.id, "Maria", birthday).await;
    create_test_contact(&mut tx, other.id, "Johnny", birthday).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    // Case-insensitive substring match, scoped to the caller.
    let request = Request::builder()
        .method("GET")
        .uri("/api/contacts/search/?query=OHNA")
        .header("authorization", bearer_for(user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["first_name"], "Johnathan");

    let request = Request::builder()
        .method("GET")
        .uri("/api/contacts/search/?query=")
        .header("authorization", bearer_for(user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_upcoming_birthdays(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", true).await;

    // Birth years differ from the current year; only month and day
    // matter. 1992 is a leap year so every month/day date exists.
    let today = Utc::now().date_naive();
    let for_offset = |days: i64| {
        let date = today + Duration::days(days);
        NaiveDate::from_ymd_opt(1992, date.month(), date.day()).unwrap()
    };

    create_test_contact(&mut tx, user.id, "Soon", for_offset(3)).await;
    // The window is inclusive at day 7 on both branches, wrap or not.
    create_test_contact(&mut tx, user.id, "Edge", for_offset(7)).await;
    create_test_contact(&mut tx, user.id, "Yesterday", for_offset(-1)).await;
    create_test_contact(&mut tx, user.id, "Far", for_offset(60)).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/contacts/upcoming/birthdays")
        .header("authorization", bearer_for(user.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["first_name"].as_str().unwrap())
        .collect();
    names.sort_unstable();

    // A birthday that was yesterday waits until next year; one exactly
    // seven days out is still inside the window.
    assert_eq!(names, vec!["Edge", "Soon"]);
}
