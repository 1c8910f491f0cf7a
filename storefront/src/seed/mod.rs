//! Start-up seeding
//!
//! Creates the bootstrap admin account and, on an empty catalog, the demo
//! items with their images downloaded into the content directory. Both steps
//! are idempotent.

use serde::Deserialize;
use shared::models::{AdminAccountCreate, CatalogItemCreate, PLACEHOLDER_IMAGE};
use shared::{AppError, AppResult};
use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::core::Config;
use crate::db::repository::{RepoError, admin, catalog};
use crate::ingest::ImageStore;

/// Demo catalog shipped with the binary
const DEMO_CATALOG: &str = include_str!("../../data/seed_catalog.json");

/// One demo item, with remote image URLs
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

fn default_available() -> bool {
    true
}

/// What a seeding run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub items_created: usize,
}

/// Parse the embedded demo catalog
pub fn demo_catalog() -> AppResult<Vec<SeedEntry>> {
    serde_json::from_str(DEMO_CATALOG)
        .map_err(|e| AppError::internal(format!("Embedded demo catalog is invalid: {e}")))
}

/// Seed the admin account and (when enabled) the demo catalog
pub async fn seed(pool: &SqlitePool, images: &ImageStore, config: &Config) -> AppResult<SeedReport> {
    let entries = if config.seed_demo_data {
        demo_catalog()?
    } else {
        Vec::new()
    };
    seed_with(pool, images, config, &entries).await
}

/// Seed using `entries` as the demo catalog
pub async fn seed_with(
    pool: &SqlitePool,
    images: &ImageStore,
    config: &Config,
    entries: &[SeedEntry],
) -> AppResult<SeedReport> {
    let admin_created = seed_admin(pool, config).await?;

    let items_created = if !config.seed_demo_data || entries.is_empty() {
        0
    } else if catalog::count_all(pool).await? > 0 {
        tracing::debug!("Catalog already populated, skipping demo data");
        0
    } else {
        seed_catalog(pool, images, entries).await?
    };

    let report = SeedReport {
        admin_created,
        items_created,
    };
    tracing::info!(
        admin_created = report.admin_created,
        items_created = report.items_created,
        "Seeding finished"
    );
    Ok(report)
}

/// Only an empty account table is seeded; changing `ADMIN_USERNAME` later
/// does not add a second account.
async fn seed_admin(pool: &SqlitePool, config: &Config) -> AppResult<bool> {
    if admin::count(pool).await? > 0 {
        return Ok(false);
    }

    let username = config.admin_username.trim();

    let password_hash = hash_password(&config.admin_password)
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;

    match admin::create(
        pool,
        AdminAccountCreate {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    {
        Ok(account) => {
            tracing::info!(username = %account.username, "Admin account created");
            if config.environment != "development" && config.admin_password == "admin123" {
                tracing::warn!("Admin account uses the default password");
            }
            Ok(true)
        }
        // Created concurrently by another process
        Err(RepoError::Duplicate(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn seed_catalog(
    pool: &SqlitePool,
    images: &ImageStore,
    entries: &[SeedEntry],
) -> AppResult<usize> {
    tracing::info!(count = entries.len(), "Seeding demo catalog");

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let image = match images.ingest_remote(&entry.image).await {
            Some(name) => name,
            None => {
                tracing::warn!(item = %entry.name, "Primary image unavailable, using placeholder");
                PLACEHOLDER_IMAGE.to_string()
            }
        };

        let mut gallery = Vec::with_capacity(entry.gallery.len());
        for url in &entry.gallery {
            if let Some(name) = images.ingest_remote(url).await {
                gallery.push(name);
            }
        }

        items.push(CatalogItemCreate {
            name: entry.name.clone(),
            category: entry.category.clone(),
            price: entry.price,
            image,
            description: entry.description.clone(),
            serving_size: entry.serving_size.clone(),
            available: entry.available,
            gallery,
            ingredients: entry.ingredients.clone(),
            allergens: entry.allergens.clone(),
            features: entry.features.clone(),
        });
    }

    Ok(catalog::create_many(pool, &items).await?)
}
