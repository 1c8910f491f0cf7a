//! Admin panel
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /admin/login | GET, POST | none |
//! | /admin/logout | GET | admin |
//! | /admin | GET | admin |
//! | /admin/pastries, /admin/pastries/{category} | GET | admin |
//! | /admin/pastries/add | GET, POST | admin |
//! | /admin/pastries/edit/{id} | GET, POST | admin |
//! | /admin/pastries/delete/{id} | GET | admin |

mod auth;
mod dashboard;
mod items;

use axum::{Router, middleware, routing::get};

use crate::auth::{LOGIN_PATH, require_admin};
use crate::core::ServerState;

/// Landing page after login
pub const ADMIN_HOME: &str = "/admin";

pub fn router(state: &ServerState) -> Router<ServerState> {
    let protected = Router::new()
        .route(ADMIN_HOME, get(dashboard::show))
        .route("/admin/logout", get(auth::logout))
        .route("/admin/pastries", get(items::list))
        .route("/admin/pastries/{category}", get(items::list_by_category))
        .route("/admin/pastries/add", get(items::add_form).post(items::add))
        .route("/admin/pastries/edit/{id}", get(items::edit_form).post(items::edit))
        .route("/admin/pastries/delete/{id}", get(items::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route(LOGIN_PATH, get(auth::login_form).post(auth::login))
        .merge(protected)
}
