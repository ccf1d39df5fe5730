use crate::application::accounts::list::ListAccountsUseCase;
use crate::application::accounts::profile::ProfileUseCase;
use crate::infrastructure::repositories::accounts::PostgresAccountRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::AccountResponse;
use crate::presentation::extractors::{AdminUser, AuthUser};
use crate::shared::error::{AppError, ErrorResponse};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Profile of the authenticated caller
#[utoipa::path(
    get,
    path = "/auth/profile",
    responses(
        (status = 200, description = "Account behind the presented token", body = AccountResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 404, description = "Token subject no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let accounts = Arc::new(PostgresAccountRepository::new(state.pool));
    let use_case = ProfileUseCase::new(accounts);

    let account = use_case.execute(&auth_user.claims.sub).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(&account))))
}

/// Admin-only listing of all accounts
#[utoipa::path(
    get,
    path = "/auth/users",
    responses(
        (status = 200, description = "All accounts", body = Vec<AccountResponse>),
        (status = 401, description = "Missing token or insufficient role", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let accounts = Arc::new(PostgresAccountRepository::new(state.pool));
    let use_case = ListAccountsUseCase::new(accounts);

    let all = use_case.execute().await?;

    tracing::info!("Admin listed all accounts: {}", admin.claims.sub);

    let body: Vec<AccountResponse> = all.iter().map(AccountResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}
