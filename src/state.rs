use contactly_cache::{CacheConfig, RedisCache};
use sqlx::PgPool;
use std::time::Duration;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::email::EmailConfig;
use crate::config::jwt::JwtConfig;
use crate::config::rate_limit::RateLimitConfig;
use crate::config::storage::StorageConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub cache: Option<RedisCache>,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub storage_config: StorageConfig,
}

pub async fn init_app_state() -> AppState {
    let cache_config = CacheConfig::from_env();
    let cache = match RedisCache::new(
        &cache_config.redis_url,
        Duration::from_secs(cache_config.default_ttl_seconds),
    )
    .await
    {
        Ok(cache) => Some(cache),
        Err(e) => {
            tracing::warn!(error = %e, "Redis unavailable, user caching disabled");
            None
        }
    };

    AppState {
        db: init_db_pool().await,
        cache,
        jwt_config: JwtConfig::from_env(),
        email_config: EmailConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        storage_config: StorageConfig::from_env(),
    }
}
