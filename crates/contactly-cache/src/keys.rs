//! Cache key construction.
//!
//! All keys share one prefix so the application's entries can be told
//! apart from anything else on the same Redis instance.

use uuid::Uuid;

const CACHE_PREFIX: &str = "contactly";

/// Keys for cached user records.
pub mod users {
    use super::*;

    /// Key under which a user row is cached by the auth layer.
    pub fn by_id(user_id: Uuid) -> String {
        format!("{}:user:{}", CACHE_PREFIX, user_id)
    }
}
