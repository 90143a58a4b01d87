//! Login and session endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use bingo_core::validation::{validate_password, validate_username};
use bingo_core::Cashier;
use bingo_db::credentials::{authenticate, LoginOutcome};

use crate::auth::CurrentCashier;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub cashier: Cashier,
}

/// POST /auth/login
#[tracing::instrument(skip(state, req), fields(username = %req.username))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    validate_username(&req.username)?;
    validate_password(&req.password)?;

    let username = req.username.trim();

    let cashier = match authenticate(&state.db.cashiers(), username, &req.password).await? {
        LoginOutcome::Authenticated(cashier) => cashier,
        LoginOutcome::InvalidCredentials => {
            return Err(ApiError::unauthorized("Invalid username or password"));
        }
        LoginOutcome::Inactive => {
            return Err(ApiError::forbidden("Cashier account is inactive"));
        }
    };

    let token = state.jwt.generate_access_token(&cashier)?;
    info!(cashier_id = cashier.id, role = ?cashier.role, "Cashier logged in");

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.jwt.access_lifetime_secs(),
        cashier,
    }))
}

/// GET /auth/me returns the account behind the token, fresh from the database.
pub async fn me(
    State(state): State<Arc<AppState>>,
    current: CurrentCashier,
) -> ApiResult<Json<Cashier>> {
    let cashier = state
        .db
        .cashiers()
        .get_by_id(current.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Session is no longer valid"))?;

    Ok(Json(cashier))
}
