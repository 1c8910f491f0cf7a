//! Catalog workflow (admin create/edit/delete)
//!
//! Orchestrates one admin submission: field validation, image ingestion,
//! list parsing and the transactional write. Holds no state between
//! requests.

mod form;

pub use form::{ItemForm, MediaUpload, NEW_CATEGORY_SENTINEL, read_multipart};

use shared::models::{CatalogItem, CatalogItemCreate};
use shared::{AppError, ErrorCode};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::repository::{RepoError, catalog};
use crate::ingest::ImageStore;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Submitted fields are unusable; nothing was written
    #[error("{0}")]
    Validation(AppError),

    #[error("Pastry {0} not found")]
    NotFound(i64),

    /// The write failed and was rolled back. `item` is the edited item as
    /// submitted, so the form can be shown again.
    #[error("Failed to save pastry: {source}")]
    Persistence {
        #[source]
        source: RepoError,
        item: Option<Box<CatalogItem>>,
    },
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Validation(e) => e,
            WorkflowError::NotFound(id) => {
                AppError::with_message(ErrorCode::ItemNotFound, format!("Pastry {id} not found"))
                    .with_detail("id", id)
            }
            WorkflowError::Persistence { source, item } => {
                let err = AppError::from(source);
                match item.map(|item| serde_json::to_value(*item)) {
                    Some(Ok(value)) => err.with_detail("item", value),
                    _ => err,
                }
            }
        }
    }
}

/// Per-request catalog mutations
pub struct CatalogWorkflow<'a> {
    pool: &'a SqlitePool,
    images: &'a ImageStore,
}

impl<'a> CatalogWorkflow<'a> {
    pub fn new(pool: &'a SqlitePool, images: &'a ImageStore) -> Self {
        Self { pool, images }
    }

    /// Create an item. A usable primary image is mandatory.
    pub async fn add(
        &self,
        form: ItemForm,
        media: MediaUpload,
    ) -> Result<CatalogItem, WorkflowError> {
        let fields = form.validate().map_err(WorkflowError::Validation)?;

        let image = match &media.image_file {
            Some(file) => self.images.ingest_upload(file).await,
            None => None,
        };
        let Some(image) = image else {
            return Err(WorkflowError::Validation(AppError::new(
                ErrorCode::ImageRequired,
            )));
        };

        let gallery = self.ingest_gallery(&media).await;

        let data = CatalogItemCreate {
            name: fields.name,
            category: fields.category,
            price: fields.price,
            image,
            description: fields.description,
            serving_size: fields.serving_size,
            available: fields.available,
            gallery,
            ingredients: fields.ingredients,
            allergens: fields.allergens,
            features: fields.features,
        };

        let item = catalog::create(self.pool, data)
            .await
            .map_err(|source| WorkflowError::Persistence { source, item: None })?;

        tracing::info!(id = item.id, name = %item.name, "Pastry added");
        Ok(item)
    }

    /// Update an item from a resubmitted form.
    ///
    /// The primary image changes only when a new file is ingested; the
    /// gallery is replaced only when at least one new file is ingested.
    pub async fn edit(
        &self,
        id: i64,
        form: ItemForm,
        media: MediaUpload,
    ) -> Result<CatalogItem, WorkflowError> {
        let mut item = self.load(id).await?;
        let fields = form.validate().map_err(WorkflowError::Validation)?;

        if let Some(file) = media.image_file.as_ref().filter(|f| !f.file_name.is_empty())
            && let Some(image) = self.images.ingest_upload(file).await
        {
            item.image = image;
        }

        let gallery = self.ingest_gallery(&media).await;
        if !gallery.is_empty() {
            item.gallery = gallery;
        }

        item.name = fields.name;
        item.category = fields.category;
        item.price = fields.price;
        item.description = fields.description;
        item.serving_size = fields.serving_size;
        item.available = fields.available;
        item.ingredients = fields.ingredients;
        item.allergens = fields.allergens;
        item.features = fields.features;

        match catalog::update(self.pool, &item).await {
            Ok(updated) => {
                tracing::info!(id, name = %updated.name, "Pastry updated");
                Ok(updated)
            }
            Err(RepoError::NotFound(_)) => Err(WorkflowError::NotFound(id)),
            Err(source) => {
                tracing::warn!(id, error = %source, "Pastry update rolled back");
                Err(WorkflowError::Persistence {
                    source,
                    item: Some(Box::new(item)),
                })
            }
        }
    }

    /// Remove an item and return what was removed. Image files are kept.
    pub async fn delete(&self, id: i64) -> Result<CatalogItem, WorkflowError> {
        let item = self.load(id).await?;

        match catalog::delete(self.pool, id).await {
            Ok(()) => {
                tracing::info!(id, name = %item.name, "Pastry deleted");
                Ok(item)
            }
            Err(RepoError::NotFound(_)) => Err(WorkflowError::NotFound(id)),
            Err(source) => Err(WorkflowError::Persistence { source, item: None }),
        }
    }

    async fn load(&self, id: i64) -> Result<CatalogItem, WorkflowError> {
        catalog::find_by_id(self.pool, id)
            .await
            .map_err(|source| WorkflowError::Persistence { source, item: None })?
            .ok_or(WorkflowError::NotFound(id))
    }

    /// Ingest gallery files in order, skipping unnamed parts and failures
    async fn ingest_gallery(&self, media: &MediaUpload) -> Vec<String> {
        let mut stored = Vec::with_capacity(media.gallery_files.len());
        for file in media.gallery_files.iter().filter(|f| !f.file_name.is_empty()) {
            if let Some(name) = self.images.ingest_upload(file).await {
                stored.push(name);
            }
        }
        stored
    }
}
