use crate::application::auth::tokens::{RefreshTokenManager, TokenPair};
use crate::domain::accounts::AccountRepository;
use crate::domain::auth::{AccessTokenIssuer, RefreshTokenRepository};
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

pub struct RefreshUseCase {
    accounts: Arc<dyn AccountRepository>,
    refresh_tokens: RefreshTokenManager,
    token_issuer: Arc<dyn AccessTokenIssuer>,
}

impl RefreshUseCase {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        refresh_token_repo: Arc<dyn RefreshTokenRepository>,
        token_issuer: Arc<dyn AccessTokenIssuer>,
    ) -> Self {
        Self {
            accounts,
            refresh_tokens: RefreshTokenManager::new(refresh_token_repo),
            token_issuer,
        }
    }

    /// Strict rotate-on-use: the presented token is spent by the redemption
    /// no matter the outcome, and a fresh pair is issued only when it was
    /// live. Unknown and expired both collapse to Unauthorized.
    pub async fn execute(&self, req: RefreshRequest) -> Result<TokenPair, AppError> {
        let redeemed = self
            .refresh_tokens
            .redeem(&req.refresh_token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("refresh token not found".to_string()))?;

        if redeemed.expired {
            return Err(AppError::Unauthorized(format!(
                "expired refresh token for account {}",
                redeemed.account_id
            )));
        }

        let account = self
            .accounts
            .find_by_id(redeemed.account_id)
            .await
            .map_err(AppError::from_repo)?
            .ok_or_else(|| {
                AppError::Unauthorized(format!(
                    "refresh token owner {} no longer exists",
                    redeemed.account_id
                ))
            })?;

        let token = self
            .token_issuer
            .issue(&account)
            .map_err(AppError::InternalServerError)?;
        let refresh_token = self.refresh_tokens.issue(account.id).await?;

        tracing::info!("Refresh token rotated for account: {}", account.username);

        Ok(TokenPair {
            token,
            refresh_token,
        })
    }
}
