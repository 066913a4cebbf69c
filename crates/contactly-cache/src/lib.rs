//! # Contactly Cache
//!
//! Redis-backed caching for the Contactly API.
//!
//! The primary consumer is the authentication layer, which caches the
//! authenticated user record between requests to avoid a database round
//! trip on every call. Values are JSON-encoded and expire after a
//! configurable TTL; read failures degrade to cache misses.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use contactly_cache::{CacheConfig, RedisCache, keys};
//!
//! let config = CacheConfig::from_env();
//! let cache = RedisCache::new(
//!     &config.redis_url,
//!     Duration::from_secs(config.default_ttl_seconds),
//! )
//! .await?;
//!
//! let key = keys::users::by_id(user_id);
//! cache.set(&key, &user).await?;
//! let cached: Option<User> = cache.get(&key).await;
//! ```

pub mod config;
pub mod keys;
pub mod redis;

pub use config::CacheConfig;
pub use redis::{CacheError, RedisCache};
