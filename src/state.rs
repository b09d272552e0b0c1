//! Shared application state for all routes, built once in `main` and cloned per request.

use crate::auth::TokenIssuer;
use crate::config::Settings;
use crate::error::ConfigError;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: &Settings) -> Result<Self, ConfigError> {
        let tokens = TokenIssuer::new(&settings.jwt_secret, settings.token_ttl_secs)?;
        Ok(AppState {
            pool,
            tokens: Arc::new(tokens),
        })
    }
}
