use crate::application::auth::login::{LoginRequest, LoginUseCase};
use crate::application::auth::refresh::{RefreshRequest, RefreshUseCase};
use crate::application::auth::register::{RegisterRequest, RegisterUseCase};
use crate::application::auth::tokens::TokenPair;
use crate::infrastructure::password::PasswordService;
use crate::infrastructure::repositories::accounts::PostgresAccountRepository;
use crate::infrastructure::repositories::refresh_tokens::PostgresRefreshTokenRepository;
use crate::infrastructure::state::AppState;
use crate::presentation::dtos::{AccountResponse, LoginResponse};
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::validation::ValidatedJson;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Register handler
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = AccountResponse),
        (status = 400, description = "Validation error or duplicate username/email", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = Arc::new(PostgresAccountRepository::new(state.pool.clone()));
    let use_case = RegisterUseCase::new(accounts, Arc::new(PasswordService::new()));

    let account = use_case.execute(req).await?;

    Ok((StatusCode::OK, Json(AccountResponse::from(&account))))
}

/// Login handler
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = Arc::new(PostgresAccountRepository::new(state.pool.clone()));
    let refresh_tokens = Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone()));
    let use_case = LoginUseCase::new(
        accounts,
        refresh_tokens,
        state.token_issuer.clone(),
        Arc::new(PasswordService::new()),
    );

    let outcome = use_case.execute(req).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse::new(&outcome.account, outcome.tokens)),
    ))
}

/// Refresh handler: exchanges a live refresh token for a fresh pair
#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Token pair rotated", body = TokenPair),
        (status = 401, description = "Unknown, spent or expired refresh token", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RefreshRequest>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = Arc::new(PostgresAccountRepository::new(state.pool.clone()));
    let refresh_tokens = Arc::new(PostgresRefreshTokenRepository::new(state.pool.clone()));
    let use_case = RefreshUseCase::new(accounts, refresh_tokens, state.token_issuer.clone());

    let pair = use_case.execute(req).await?;

    Ok((StatusCode::OK, Json(pair)))
}
