//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::BlogService;
use scribe_core::ports::{BlogRepository, PasswordService, TokenService, UserRepository};
use scribe_infra::{
    Argon2PasswordService, InMemoryBlogRepository, InMemoryUserRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use scribe_infra::{PostgresBlogRepository, PostgresUserRepository};

use scribe_infra::database::DatabaseConfig;

use crate::config::AppConfig;

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to connect to database: {0}")]
    Database(String),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: BlogService,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    pub fn from_parts(
        blog_repo: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            blogs: BlogService::new(blog_repo),
            users,
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    /// State backed by the in-memory repositories.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        Self::from_parts(
            Arc::new(InMemoryBlogRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            tokens,
        )
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory(tokens));
        };

        connect_store(db_config, tokens).await
    }
}

#[cfg(feature = "postgres")]
async fn connect_store(
    db_config: &DatabaseConfig,
    tokens: Arc<dyn TokenService>,
) -> Result<AppState, StartupError> {
    let conn = scribe_infra::database::connect(db_config)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let conn = Arc::new(conn);

    tracing::info!("Application state initialized");
    Ok(AppState::from_parts(
        Arc::new(PostgresBlogRepository::new(Arc::clone(&conn))),
        Arc::new(PostgresUserRepository::new(conn)),
        tokens,
    ))
}

#[cfg(not(feature = "postgres"))]
async fn connect_store(
    _db_config: &DatabaseConfig,
    tokens: Arc<dyn TokenService>,
) -> Result<AppState, StartupError> {
    tracing::warn!("Built without postgres feature - ignoring DATABASE_URL, using in-memory mode");
    Ok(AppState::in_memory(tokens))
}
