use crate::domain::accounts::{Account, AccountRepository};
use crate::shared::error::AppError;
use std::sync::Arc;

/// Admin-only listing of every account. The role gate lives at the HTTP
/// boundary; this use case assumes the caller already passed it.
pub struct ListAccountsUseCase {
    accounts: Arc<dyn AccountRepository>,
}

impl ListAccountsUseCase {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self) -> Result<Vec<Account>, AppError> {
        self.accounts.find_all().await.map_err(AppError::from_repo)
    }
}
