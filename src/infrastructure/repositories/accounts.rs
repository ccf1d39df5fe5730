use crate::domain::accounts::{Account, AccountRepository, NewAccount};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::accounts::AccountRow;
use async_trait::async_trait;

#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: DbPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, anyhow::Error> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(new_account.username)
        .bind(new_account.email)
        .bind(new_account.password_hash)
        .bind(new_account.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, anyhow::Error> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, anyhow::Error> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Account::try_from).transpose()
    }

    async fn exists_with_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, anyhow::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1 OR email = $2)
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_all(&self) -> Result<Vec<Account>, anyhow::Error> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn admin_exists(&self) -> Result<bool, anyhow::Error> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE role = 'Admin')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
