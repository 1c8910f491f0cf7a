//! Admin gate middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use shared::AppError;

use crate::auth::session::token_from_headers;
use crate::core::ServerState;
use crate::db::repository::admin;
use crate::security_log;

/// Login page every unauthenticated admin request is sent to
pub const LOGIN_PATH: &str = "/admin/login";

/// Require a valid admin session.
///
/// On success the [`CurrentAdmin`](crate::auth::CurrentAdmin) is inserted
/// into the request extensions. Missing, invalid and expired sessions, and
/// sessions whose account has since been removed or renamed, are answered
/// with `303 See Other` to the login page.
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = token_from_headers(req.headers()) else {
        tracing::debug!(uri = %req.uri(), "Admin session missing, redirecting to login");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let current = match state.sessions.validate(token) {
        Ok(current) => current,
        Err(e) => {
            security_log!(
                "WARN",
                "session_rejected",
                uri = req.uri().to_string(),
                error = e.to_string()
            );
            return Redirect::to(LOGIN_PATH).into_response();
        }
    };

    match admin::find_by_id(&state.pool, current.id).await {
        Ok(Some(account)) if account.username == current.username => {
            req.extensions_mut().insert(current);
            next.run(req).await
        }
        Ok(_) => {
            security_log!(
                "WARN",
                "session_rejected",
                uri = req.uri().to_string(),
                username = current.username,
                error = "account no longer exists"
            );
            Redirect::to(LOGIN_PATH).into_response()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}
