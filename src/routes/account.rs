// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: save, lookup, authenticate.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::auth::{
    create_jwt, session_user_id, AuthUser, SESSION_COOKIE, SESSION_TTL_SECS,
};
use crate::models::{Account, AccountForm};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Public account routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/spotcheck/v1/saveAccount", post(save_account))
        .route("/spotcheck/v1/account/{email}", get(get_account))
        .route(
            "/spotcheck/v1/authenticateAccount",
            post(authenticate_account),
        )
        .route("/spotcheck/v1/logout", post(logout))
}

/// Routes that need a session. The auth middleware is applied in routes/mod.rs.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/spotcheck/v1/me", get(get_me))
}

/// Account as returned to clients. The password hash never leaves the server.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AccountResponse {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.user_id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Create or update an account.
///
/// Anyone may create an account. Updating one needs that account's session.
async fn save_account(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    form: std::result::Result<Json<AccountForm>, JsonRejection>,
) -> Result<Json<AccountResponse>> {
    let Json(form) = form?;
    let session = session_user_id(&jar, &headers, &state.config.jwt_signing_key);
    let account = state
        .account_service
        .upsert_account(form, session.as_deref())
        .await?;
    Ok(Json(account.into()))
}

/// Look up an account by email.
async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<AccountResponse>> {
    let account = state
        .account_service
        .get_account(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", email)))?;

    Ok(Json(account.into()))
}

// ─── Authentication ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct AuthenticateRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthenticateResponse {
    pub account: AccountResponse,
    /// Session JWT, also set as an HttpOnly cookie
    pub token: String,
}

fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
        .build()
}

/// Verify email and password, then start a session.
///
/// Unknown email and wrong password both answer 401 so callers can't discover
/// which addresses have accounts.
async fn authenticate_account(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    req: std::result::Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthenticateResponse>)> {
    let Json(req) = req?;
    let account = state
        .account_service
        .authenticate_account(&req.email, &req.password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = create_jwt(&account.user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let jar = jar.add(session_cookie(&state.config, token.clone()));

    Ok((
        jar,
        Json(AuthenticateResponse {
            account: account.into(),
            token,
        }),
    ))
}

/// End the session by expiring the cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

/// Get the account behind the current session.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<AccountResponse>> {
    let account = state
        .account_service
        .get_account(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", user.user_id)))?;

    Ok(Json(account.into()))
}
