//! Admin Account Model

use serde::{Deserialize, Serialize};

/// Administrator account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string, never sent to clients
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Create admin payload (password already hashed)
#[derive(Debug, Clone)]
pub struct AdminAccountCreate {
    pub username: String,
    pub password_hash: String,
}
