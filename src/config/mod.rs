//! Configuration modules for the Contactly API.
//!
//! Each submodule handles a specific aspect of configuration, loaded
//! from environment variables.
//!
//! # Modules
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL database connection pool initialization
//! - [`email`]: Email/SMTP configuration for confirmation mail
//! - [`jwt`]: JWT authentication configuration
//! - [`rate_limit`]: API rate limiting configuration
//! - [`storage`]: Avatar upload storage configuration

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod rate_limit;
pub mod storage;
