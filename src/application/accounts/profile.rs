use crate::domain::accounts::{Account, AccountRepository};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Look up the account behind a verified access token. A valid token whose
/// subject no longer exists is a stale identity, reported as NotFound
/// rather than Unauthorized.
pub struct ProfileUseCase {
    accounts: Arc<dyn AccountRepository>,
}

impl ProfileUseCase {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, username: &str) -> Result<Account, AppError> {
        self.accounts
            .find_by_username(username)
            .await
            .map_err(AppError::from_repo)?
            .ok_or(AppError::NotFound)
    }
}
