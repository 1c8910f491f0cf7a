//! Admin login and logout

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use http::{HeaderMap, header};
use serde::{Deserialize, Serialize};
use shared::{ApiResponse, AppError};

use super::ADMIN_HOME;
use crate::auth::session::token_from_headers;
use crate::auth::{LOGIN_PATH, verify};
use crate::core::ServerState;
use crate::security_log;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub action: &'static str,
}

/// GET /admin/login - already signed in goes straight to the dashboard
pub async fn login_form(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    let signed_in = token_from_headers(&headers)
        .map(|token| state.sessions.validate(token).is_ok())
        .unwrap_or(false);

    if signed_in {
        return Redirect::to(ADMIN_HOME).into_response();
    }
    ApiResponse::success(LoginPage { action: LOGIN_PATH }).into_response()
}

/// POST /admin/login
pub async fn login(
    State(state): State<ServerState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let account = match verify(&state.pool, &form.username, &form.password).await {
        Ok(account) => account,
        Err(e) => {
            security_log!(
                "WARN",
                "login_failed",
                username = form.username.trim().to_string(),
                reason = e.message.clone()
            );
            return Err(e);
        }
    };

    let token = state
        .sessions
        .issue(&account)
        .map_err(|e| AppError::internal(e.to_string()))?;

    security_log!(
        "INFO",
        "login_success",
        username = account.username.clone(),
        admin_id = account.id
    );

    Ok((
        [(header::SET_COOKIE, state.sessions.session_cookie(&token))],
        Redirect::to(ADMIN_HOME),
    )
        .into_response())
}

/// GET /admin/logout
pub async fn logout(State(state): State<ServerState>) -> Response {
    tracing::info!("Admin logged out");
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
