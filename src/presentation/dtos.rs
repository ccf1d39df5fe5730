use crate::application::auth::tokens::TokenPair;
use crate::domain::accounts::{Account, Role};
use serde::Serialize;

/// Public projection of an account: never the id, never the hash.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AccountResponse {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub role: Role,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
            role: account.role,
        }
    }
}

/// Login response: the account projection plus the freshly minted pair
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub token: String,
    pub refresh_token: String,
}

impl LoginResponse {
    pub fn new(account: &Account, tokens: TokenPair) -> Self {
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
            role: account.role,
            token: tokens.token,
            refresh_token: tokens.refresh_token,
        }
    }
}
