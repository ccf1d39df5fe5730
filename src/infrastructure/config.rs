use anyhow::{Context, Result, bail};
use std::env;
use std::str::FromStr;

/// Access tokens live for 15 minutes. Fixed; not configurable per call.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 900;
/// Refresh tokens live for 7 days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Signing parameters shared by the issuer and every verification site.
/// Read-only after startup.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 5,
            acquire_timeout_secs: 3,
            idle_timeout_secs: 600,
        }
    }
}

/// Bootstrap admin credentials; seeding is skipped when no password is
/// configured.
#[derive(Debug, Clone)]
pub struct SeedAdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub db: DbConfig,
    pub seed_admin: Option<SeedAdminConfig>,
}

impl AppConfig {
    /// Read the whole process configuration once at startup. An absent or
    /// empty `JWT_SECRET` is fatal here, never per-request.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let secret = env::var("JWT_SECRET").unwrap_or_default();
        if secret.is_empty() {
            bail!("JWT_SECRET must be set to a non-empty value");
        }

        let jwt = JwtConfig {
            secret,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "tessera".to_string()),
            audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "tessera-clients".to_string()),
        };

        let db = DbConfig {
            max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_or("DB_MIN_CONNECTIONS", 5),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 3),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", 600),
        };

        let seed_admin = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .map(|password| SeedAdminConfig {
                username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
                email: env::var("ADMIN_EMAIL")
                    .unwrap_or_else(|_| "admin@example.com".to_string()),
                password,
            });

        Ok(Self {
            database_url,
            port: env_or("PORT", 3000),
            jwt,
            db,
            seed_admin,
        })
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
