use crate::domain::accounts::{Account, AccountRepository, NewAccount, Role};
use crate::domain::auth::{NewRefreshToken, RefreshToken, RefreshTokenRepository};
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;

/// In-memory account store for unit tests. Enforces the same uniqueness
/// rules as the real schema so accidental duplicates fail loudly.
#[derive(Default)]
pub struct MockAccountRepository {
    accounts: Arc<Mutex<Vec<Account>>>,
    next_id: AtomicI64,
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, anyhow::Error> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .iter()
            .any(|a| a.username == new_account.username || a.email == new_account.email)
        {
            anyhow::bail!("duplicate username or email");
        }

        let now = OffsetDateTime::now_utc();
        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            username: new_account.username,
            email: new_account.email,
            password_hash: new_account.password_hash,
            role: new_account.role,
            created_at: now,
            updated_at: now,
        };
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, anyhow::Error> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, anyhow::Error> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn exists_with_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, anyhow::Error> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .any(|a| a.username == username || a.email == email))
    }

    async fn find_all(&self) -> Result<Vec<Account>, anyhow::Error> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn admin_exists(&self) -> Result<bool, anyhow::Error> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().any(|a| a.role == Role::Admin))
    }
}

/// In-memory refresh token store. `consume` removes the row under the lock,
/// matching the real repository's one-winner semantics.
#[derive(Default)]
pub struct MockRefreshTokenRepository {
    tokens: Arc<Mutex<Vec<RefreshToken>>>,
    next_id: AtomicI64,
}

impl MockRefreshTokenRepository {
    pub fn outstanding(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<RefreshToken> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn create(&self, token: NewRefreshToken) -> Result<RefreshToken, anyhow::Error> {
        let mut tokens = self.tokens.lock().unwrap();
        if tokens.iter().any(|t| t.token_hash == token.token_hash) {
            anyhow::bail!("duplicate token value");
        }

        let row = RefreshToken {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            account_id: token.account_id,
            token_hash: token.token_hash,
            created_at: OffsetDateTime::now_utc(),
            expires_at: token.expires_at,
        };
        tokens.push(row.clone());
        Ok(row)
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<RefreshToken>, anyhow::Error> {
        let mut tokens = self.tokens.lock().unwrap();
        let position = tokens.iter().position(|t| t.token_hash == token_hash);
        Ok(position.map(|i| tokens.remove(i)))
    }

    async fn delete_expired(&self) -> Result<u64, anyhow::Error> {
        let mut tokens = self.tokens.lock().unwrap();
        let before = tokens.len();
        let now = OffsetDateTime::now_utc();
        tokens.retain(|t| !t.is_expired_at(now));
        Ok((before - tokens.len()) as u64)
    }
}
