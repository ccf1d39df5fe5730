use crate::domain::auth::AccessTokenIssuer;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub token_issuer: Arc<dyn AccessTokenIssuer>,
}

impl AppState {
    pub fn new(pool: DbPool, token_issuer: Arc<dyn AccessTokenIssuer>) -> Self {
        Self { pool, token_issuer }
    }
}
