//! Redis-backed cache client.
//!
//! Values are stored as JSON under a TTL. Reads are deliberately
//! infallible: any Redis or decode problem is logged and treated as a
//! miss, so callers fall through to their source of truth.

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Cache handle over a shared Redis connection.
///
/// `ConnectionManager` multiplexes and reconnects internally, so the
/// handle is cheap to clone and safe to hold in application state.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    ttl: Duration,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Connects to Redis. Entries written through [`set`](Self::set)
    /// expire after `ttl`.
    pub async fn new(redis_url: &str, ttl: Duration) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn, ttl })
    }

    /// Looks up and decodes a cached value. Missing keys, Redis errors,
    /// and undecodable payloads all come back as `None`.
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.conn.clone();

        let raw = match conn.get::<_, Option<String>>(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                error!(cache.key = %key, error = %e, "Redis GET failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(cache.key = %key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                // A stale schema from a previous deploy decodes as a miss.
                error!(cache.key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Encodes and stores a value under the configured TTL.
    #[instrument(skip(self, value), fields(cache.operation = "SETEX"))]
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, json, self.ttl.as_secs()).await?;

        debug!(cache.key = %key, cache.ttl_secs = %self.ttl.as_secs(), "Cache set");
        Ok(())
    }

    /// Deletes a key. Deleting an absent key is not an error.
    #[instrument(skip(self), fields(cache.operation = "DEL"))]
    pub async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(key).await?;

        debug!(cache.key = %key, "Cache invalidated");
        Ok(())
    }
}
