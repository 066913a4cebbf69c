//! Database configuration and connection pool initialization.
//!
//! The database URL is read from the `DATABASE_URL` environment
//! variable. The returned pool is cheaply cloneable and is held in the
//! application state for use in request handlers.
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is not set or the
//! connection cannot be established; both are startup-fatal.

use sqlx::PgPool;
use std::env;

pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
