//! Admin authentication
//!
//! - [`verify`] - credential check against stored Argon2 hashes
//! - [`SessionService`] - signed session tokens in an HttpOnly cookie
//! - [`require_admin`] - gate for `/admin/*`

pub mod middleware;
pub mod password;
pub mod session;

pub use middleware::{LOGIN_PATH, require_admin};
pub use session::{CurrentAdmin, SESSION_COOKIE, SessionError, SessionService};

use shared::models::AdminAccount;
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

use crate::db::repository::admin;
use crate::utils::validation::{MAX_PASSWORD_LEN, MAX_USERNAME_LEN};

/// Check a username/password pair.
///
/// Unknown usernames and wrong passwords produce the same error, as do
/// inputs longer than any stored account could match.
pub async fn verify(pool: &SqlitePool, username: &str, password: &str) -> AppResult<AdminAccount> {
    let username = username.trim();
    if username.chars().count() > MAX_USERNAME_LEN || password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::invalid_credentials());
    }

    let account = admin::find_by_username(pool, username).await?;

    match account {
        Some(account) if password::verify_password(password, &account.password_hash) => {
            Ok(account)
        }
        _ => Err(AppError::invalid_credentials()),
    }
}
