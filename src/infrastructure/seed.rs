use crate::domain::accounts::{AccountRepository, NewAccount, Role};
use crate::domain::password::PasswordHashingService;
use crate::infrastructure::config::SeedAdminConfig;
use anyhow::Result;
use std::sync::Arc;

/// Create the bootstrap Admin account at startup unless one already exists.
/// Role promotion has no request path; this is the only way an Admin comes
/// into being.
pub async fn seed_admin(
    accounts: Arc<dyn AccountRepository>,
    passwords: Arc<dyn PasswordHashingService>,
    seed: &SeedAdminConfig,
) -> Result<()> {
    if accounts.admin_exists().await? {
        tracing::debug!("Admin account already present, skipping seed");
        return Ok(());
    }

    let password_hash = passwords.hash_password(&seed.password)?;

    let admin = accounts
        .create(NewAccount {
            username: seed.username.clone(),
            email: seed.email.clone(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    tracing::info!("Seeded admin account: {}", admin.username);
    Ok(())
}
