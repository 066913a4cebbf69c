use chrono::NaiveDate;
use contactly::config::cors::CorsConfig;
use contactly::config::email::EmailConfig;
use contactly::config::jwt::JwtConfig;
use contactly::config::rate_limit::RateLimitConfig;
use contactly::config::storage::StorageConfig;
use contactly::router::init_router;
use contactly::state::AppState;
use contactly::utils::jwt::create_access_token;
use contactly::utils::password::hash_password;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[allow(dead_code)]
pub struct TestContact {
    pub id: Uuid,
    pub email: String,
    pub phone: String,
}

/// Build an app with the same router as production but without Redis,
/// SMTP, or meaningful rate limits.
#[allow(dead_code)]
pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = test_app_state(pool);
    init_router(state)
}

#[allow(dead_code)]
pub fn test_app_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        cache: None,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig {
            users_per_second: 1,
            users_burst_size: 1000,
        },
        storage_config: StorageConfig::from_env(),
    }
}

/// Insert a user directly, bypassing the signup flow.
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    confirmed: bool,
) -> TestUser {
    let hashed = hash_password(password).unwrap();
    let username = format!("user-{}", &Uuid::new_v4().to_string()[..8]);

    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, password, confirmed)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&username)
    .bind(email)
    .bind(&hashed)
    .bind(confirmed)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        username,
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn create_test_contact(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    first_name: &str,
    birthday: NaiveDate,
) -> TestContact {
    let email = format!("{}-{}@contacts.test", first_name.to_lowercase(), Uuid::new_v4());
    let phone = format!("+49{}", &Uuid::new_v4().as_u128().to_string()[..9]);

    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO contacts (first_name, last_name, email, phone, birthday, user_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind("Tester")
    .bind(&email)
    .bind(&phone)
    .bind(birthday)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestContact { id, email, phone }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Bearer header value for the given user, using the same config the
/// test app was built with.
#[allow(dead_code)]
pub fn bearer_for(user_id: Uuid) -> String {
    dotenvy::dotenv().ok();
    let token = create_access_token(user_id, &JwtConfig::from_env()).unwrap();
    format!("Bearer {}", token)
}
