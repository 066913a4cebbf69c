use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

/// Rate limit configuration for the user-profile endpoints.
///
/// Those routes allow one request per `users_per_second` seconds per
/// client IP; everything else is unthrottled.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Seconds that must pass between requests to `/api/users` routes
    pub users_per_second: u64,
    /// Burst size for `/api/users` routes
    pub users_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            users_per_second: 20,
            users_burst_size: 1,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        Self {
            users_per_second: std::env::var("RATE_LIMIT_USERS_PER_SECOND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            users_burst_size: std::env::var("RATE_LIMIT_USERS_BURST_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    pub fn users_governor_config(
        &self,
    ) -> GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware> {
        GovernorConfigBuilder::default()
            .per_second(self.users_per_second)
            .burst_size(self.users_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("Failed to build users rate limiter config")
    }
}
