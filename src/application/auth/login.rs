use crate::application::auth::tokens::{RefreshTokenManager, TokenPair};
use crate::domain::accounts::{Account, AccountRepository};
use crate::domain::auth::{AccessTokenIssuer, RefreshTokenRepository};
use crate::domain::password::PasswordHashingService;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Authenticated account plus the freshly minted pair
#[derive(Debug)]
pub struct LoginOutcome {
    pub account: Account,
    pub tokens: TokenPair,
}

pub struct LoginUseCase {
    accounts: Arc<dyn AccountRepository>,
    refresh_tokens: RefreshTokenManager,
    token_issuer: Arc<dyn AccessTokenIssuer>,
    passwords: Arc<dyn PasswordHashingService>,
}

impl LoginUseCase {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        token_issuer: Arc<dyn AccessTokenIssuer>,
        passwords: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens: RefreshTokenManager::new(refresh_token_repo),
            token_issuer,
            passwords,
        }
    }

    /// Unknown username and wrong password deliberately produce the same
    /// error variant; the distinction exists only in the logs.
    #[tracing::instrument(skip(self, req), fields(username = %req.username))]
    pub async fn execute(&self, req: LoginRequest) -> Result<LoginOutcome, AppError> {
        let account = self
            .accounts
            .find_by_username(&req.username)
            .await
            .map_err(AppError::from_repo)?
            .ok_or_else(|| AppError::Unauthorized(format!("unknown username: {}", req.username)))?;

        let valid = self
            .passwords
            .verify_password(&req.password, &account.password_hash)
            .map_err(AppError::InternalServerError)?;

        if !valid {
            return Err(AppError::Unauthorized(format!(
                "password mismatch for: {}",
                account.username
            )));
        }

        let token = self
            .token_issuer
            .issue(&account)
            .map_err(AppError::InternalServerError)?;
        let refresh_token = self.refresh_tokens.issue(account.id).await?;

        tracing::info!("Account logged in: {}", account.username);

        Ok(LoginOutcome {
            account,
            tokens: TokenPair {
                token,
                refresh_token,
            },
        })
    }
}
