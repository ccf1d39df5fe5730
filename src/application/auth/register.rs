use crate::domain::accounts::{Account, AccountRepository, NewAccount, Role};
use crate::domain::password::PasswordHashingService;
use crate::shared::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "alice", min_length = 3)]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "Secret123!", min_length = 6)]
    pub password: String,
}

pub struct RegisterUseCase {
    accounts: Arc<dyn AccountRepository>,
    passwords: Arc<dyn PasswordHashingService>,
}

impl RegisterUseCase {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        passwords: Arc<dyn PasswordHashingService>,
    ) -> Self {
        Self {
            accounts,
            passwords,
        }
    }

    #[tracing::instrument(skip(self, req), fields(username = %req.username))]
    pub async fn execute(&self, req: RegisterRequest) -> Result<Account, AppError> {
        // Friendly pre-check; the unique indexes below remain the
        // authoritative guard under concurrent registration.
        let taken = self
            .accounts
            .exists_with_username_or_email(&req.username, &req.email)
            .await
            .map_err(AppError::from_repo)?;

        if taken {
            return Err(AppError::Conflict(format!(
                "username or email already registered: {} / {}",
                req.username, req.email
            )));
        }

        let password_hash = self
            .passwords
            .hash_password(&req.password)
            .map_err(AppError::InternalServerError)?;

        let new_account = NewAccount {
            username: req.username,
            email: req.email,
            password_hash,
            role: Role::User,
        };

        match self.accounts.create(new_account).await {
            Ok(account) => {
                tracing::info!("New account registered: {}", account.username);
                Ok(account)
            }
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(
                "lost duplicate-registration race".to_string(),
            )),
            Err(e) => Err(AppError::from_repo(e)),
        }
    }
}

/// True when the error chain bottoms out in a store unique-index violation.
fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|db| db.is_unique_violation())
}
