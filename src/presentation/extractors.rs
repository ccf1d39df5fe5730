use crate::domain::accounts::Role;
use crate::domain::auth::Claims;
use crate::infrastructure::state::AppState;
use crate::shared::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Authenticated caller: validates the bearer access token from the
/// Authorization header against the process-wide issuer.
pub struct AuthUser {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("malformed Authorization header".to_string()))?;

        let claims = state
            .token_issuer
            .verify(token)
            .map_err(|e| AppError::Unauthorized(format!("access token rejected: {}", e)))?;

        Ok(AuthUser { claims })
    }
}

/// Admin gate: an authenticated caller whose role claim is Admin. Wrong
/// role is the same uniform 401 as every other auth failure.
pub struct AdminUser {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser { claims } = AuthUser::from_request_parts(parts, state).await?;

        if claims.role != Role::Admin {
            return Err(AppError::Unauthorized(format!(
                "role {} lacks Admin on {}",
                claims.role, claims.sub
            )));
        }

        Ok(AdminUser { claims })
    }
}
