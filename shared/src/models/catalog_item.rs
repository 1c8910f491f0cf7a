//! Catalog Item Model

use serde::{Deserialize, Serialize};

/// Stored reference used when an item has no resolvable image
pub const PLACEHOLDER_IMAGE: &str = "placeholder.png";

/// Public URL shown in place of a missing image
pub const PLACEHOLDER_URL: &str = "https://placehold.co/400x400/cccccc/333333?text=No+Image";

/// URL prefix under which ingested images are served
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads";

/// Catalog item ("pastry")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    /// Free-form category label; categories are derived from items
    pub category: String,
    /// Whole currency units
    pub price: f64,
    /// Storage name of the primary image
    pub image: String,
    pub description: String,
    pub serving_size: Option<String>,
    pub available: bool,
    /// Storage names of additional images, in upload order
    pub gallery: Vec<String>,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub features: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CatalogItem {
    /// Public URL of the primary image
    pub fn image_url(&self) -> String {
        resolve_image_url(&self.image)
    }

    /// Public URLs of the gallery images, in order
    pub fn gallery_urls(&self) -> Vec<String> {
        self.gallery.iter().map(|r| resolve_image_url(r)).collect()
    }
}

/// Map a stored image reference to the URL a browser should load.
///
/// Empty references and the placeholder reference resolve to the hosted
/// placeholder image.
pub fn resolve_image_url(reference: &str) -> String {
    let reference = reference.trim();
    if reference.is_empty() || reference == PLACEHOLDER_IMAGE {
        PLACEHOLDER_URL.to_string()
    } else {
        format!("{UPLOAD_URL_PREFIX}/{reference}")
    }
}

/// Create catalog item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItemCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    pub description: String,
    pub serving_size: Option<String>,
    pub available: bool,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Number of items in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}
