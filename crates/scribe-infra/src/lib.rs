//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - `minimal` - No external store, in-memory repositories only

pub mod auth;
pub mod database;

// Re-exports - In-Memory
pub use database::{InMemoryBlogRepository, InMemoryUserRepository};

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "postgres")]
pub use database::{PostgresBlogRepository, PostgresUserRepository};
