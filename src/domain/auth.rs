use crate::domain::accounts::{Account, Role};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Access-token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role claim used by the admin gate
    pub role: Role,
    pub iss: String,
    pub aud: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Persisted refresh token row. The `token_hash` column holds the SHA-256
/// of the opaque value handed to the client; the plaintext never touches
/// the store.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: i64,
    pub account_id: i64,
    pub token_hash: String,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl RefreshToken {
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

/// New refresh token for creation
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub account_id: i64,
    pub token_hash: String,
    pub expires_at: OffsetDateTime,
}

/// Repository trait for refresh tokens
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Insert a new refresh token row
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken>;

    /// Atomically remove the row matching `token_hash` and return it.
    /// At most one concurrent caller wins a given row; the rest observe None.
    /// Expired rows are consumed like live ones.
    async fn consume(&self, token_hash: &str) -> Result<Option<RefreshToken>>;

    /// Delete rows past their expiry, returning how many were removed
    async fn delete_expired(&self) -> Result<u64>;
}

/// Issues and verifies signed access tokens
pub trait AccessTokenIssuer: Send + Sync {
    /// Mint a short-lived signed token for an account
    fn issue(&self, account: &Account) -> Result<String>;

    /// Validate signature, issuer, audience and expiry; return the claims
    fn verify(&self, token: &str) -> Result<Claims>;
}
