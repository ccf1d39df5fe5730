use crate::domain::accounts::Account;
use crate::domain::auth::{AccessTokenIssuer, Claims};
use crate::infrastructure::config::{ACCESS_TOKEN_TTL_SECS, JwtConfig};
use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use time::OffsetDateTime;

/// Access-token issuer signing with HMAC-SHA-256 and the process-wide
/// secret. Keys are derived once at startup; there is no mutation path.
pub struct JwtAccessTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl JwtAccessTokenIssuer {
    pub fn new(config: &JwtConfig) -> Result<Self> {
        // Config loading already rejects an empty secret; guard the direct
        // construction path too.
        if config.secret.is_empty() {
            anyhow::bail!("Signing secret must not be empty");
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        })
    }
}

impl AccessTokenIssuer for JwtAccessTokenIssuer {
    fn issue(&self, account: &Account) -> Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: account.username.clone(),
            role: account.role,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now + ACCESS_TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign access token: {}", e))
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        // Exact expiry check, no clock-skew allowance.
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}
