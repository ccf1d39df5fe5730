use crate::domain::auth::{NewRefreshToken, RefreshTokenRepository};
use crate::infrastructure::config::REFRESH_TOKEN_TTL_SECS;
use crate::shared::error::AppError;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

/// Access/refresh pair returned by login and refresh
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Bytes of CSPRNG output behind each refresh token value
const REFRESH_TOKEN_ENTROPY_BYTES: usize = 64;

/// Generate an opaque refresh token value: 64 random bytes, hex encoded.
/// The value carries no structure; its only authority is a matching row.
pub fn generate_refresh_token_value() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_ENTROPY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// SHA-256 hash of a token value. Only the hash is persisted, so a leaked
/// table contains nothing redeemable.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Outcome of a redemption that found a row. By the time the caller sees
/// this, the row is gone.
#[derive(Debug, Clone, Copy)]
pub struct RedeemedToken {
    pub account_id: i64,
    pub expired: bool,
}

/// Mints opaque refresh tokens and consumes them exactly once. A token
/// moves Active -> Expired by the clock alone and leaves the store the
/// first time anyone presents it.
pub struct RefreshTokenManager {
    repo: Arc<dyn RefreshTokenRepository>,
}

impl RefreshTokenManager {
    pub fn new(repo: Arc<dyn RefreshTokenRepository>) -> Self {
        Self { repo }
    }

    /// Mint and persist a refresh token for an account; returns the
    /// plaintext value handed to the client. Any number of outstanding
    /// tokens per account is fine.
    pub async fn issue(&self, account_id: i64) -> Result<String, AppError> {
        let value = generate_refresh_token_value();
        let expires_at = OffsetDateTime::now_utc() + Duration::seconds(REFRESH_TOKEN_TTL_SECS);

        self.repo
            .create(NewRefreshToken {
                account_id,
                token_hash: hash_token(&value),
                expires_at,
            })
            .await
            .map_err(AppError::from_repo)?;

        Ok(value)
    }

    /// Redeem a presented value. The matching row is deleted before expiry
    /// is evaluated, so a token spends itself even when it turns out to be
    /// expired and cannot be replayed to probe validity. None means no such
    /// token exists (never existed, already used, or reaped).
    pub async fn redeem(&self, value: &str) -> Result<Option<RedeemedToken>, AppError> {
        let row = self
            .repo
            .consume(&hash_token(value))
            .await
            .map_err(AppError::from_repo)?;

        Ok(row.map(|token| RedeemedToken {
            account_id: token.account_id,
            expired: token.is_expired_at(OffsetDateTime::now_utc()),
        }))
    }
}
