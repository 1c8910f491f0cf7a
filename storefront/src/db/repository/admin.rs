//! Admin Account Repository

use super::{RepoError, RepoResult};
use shared::models::{AdminAccount, AdminAccountCreate};
use sqlx::SqlitePool;

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> RepoResult<Option<AdminAccount>> {
    let account = sqlx::query_as::<_, AdminAccount>(
        "SELECT id, username, password_hash FROM admin_user WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(account)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AdminAccount>> {
    let account = sqlx::query_as::<_, AdminAccount>(
        "SELECT id, username, password_hash FROM admin_user WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(account)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_user")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: AdminAccountCreate) -> RepoResult<AdminAccount> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO admin_user (username, password_hash) VALUES (?, ?) RETURNING id",
    )
    .bind(&data.username)
    .bind(&data.password_hash)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin account".into()))
}
