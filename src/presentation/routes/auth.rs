use crate::infrastructure::state::AppState;
use crate::presentation::handlers::{accounts, auth};
use axum::{
    Router,
    routing::{get, post},
};

/// Auth routes: registration, session issuance, rotation, and the two
/// token-gated reads
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
        .route("/profile", get(accounts::profile))
        .route("/users", get(accounts::list_accounts))
}
