//! Admin item form

use axum::extract::Multipart;
use shared::attrs;
use shared::{AppError, ErrorCode};

use crate::ingest::UploadedFile;
use crate::utils::validation::{
    MAX_CATEGORY_LEN, MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_SERVING_SIZE_LEN,
    validate_optional_text, validate_required_text,
};

/// Category value meaning "use `new_category_input` instead"
pub const NEW_CATEGORY_SENTINEL: &str = "new_category";

/// Text fields of an admin add/edit submission, as submitted
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub name: String,
    /// Raw price text; parsed during validation
    pub price: String,
    pub description: String,
    pub serving_size: Option<String>,
    pub available: bool,
    pub category: String,
    pub new_category_input: Option<String>,
    /// JSON arrays of strings
    pub ingredients: Option<String>,
    pub allergens: Option<String>,
    pub features: Option<String>,
}

/// File parts of an admin add/edit submission
#[derive(Debug, Clone, Default)]
pub struct MediaUpload {
    pub image_file: Option<UploadedFile>,
    pub gallery_files: Vec<UploadedFile>,
}

/// Form fields after validation
#[derive(Debug)]
pub(super) struct ValidFields {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
    pub serving_size: Option<String>,
    pub available: bool,
    pub ingredients: Vec<String>,
    pub allergens: Vec<String>,
    pub features: Vec<String>,
}

impl ItemForm {
    pub(super) fn validate(&self) -> Result<ValidFields, AppError> {
        let name = self.name.trim().to_string();
        validate_required_text(&name, "name", MAX_NAME_LEN)?;

        let category = self.resolve_category()?;
        validate_required_text(&category, "category", MAX_CATEGORY_LEN)?;

        let price = parse_price(&self.price)?;

        let description = self.description.trim().to_string();
        validate_required_text(&description, "description", MAX_MESSAGE_LEN)?;

        let serving_size = self
            .serving_size
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        validate_optional_text(&serving_size, "serving_size", MAX_SERVING_SIZE_LEN)?;

        Ok(ValidFields {
            name,
            category,
            price,
            description,
            serving_size,
            available: self.available,
            ingredients: parse_list("ingredients", self.ingredients.as_deref())?,
            allergens: parse_list("allergens", self.allergens.as_deref())?,
            features: parse_list("features", self.features.as_deref())?,
        })
    }

    fn resolve_category(&self) -> Result<String, AppError> {
        if self.category != NEW_CATEGORY_SENTINEL {
            return Ok(self.category.trim().to_string());
        }
        match self.new_category_input.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(AppError::new(ErrorCode::CategoryRequired)
                .with_detail("field", "new_category_input")),
        }
    }
}

fn parse_price(raw: &str) -> Result<f64, AppError> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(AppError::new(ErrorCode::InvalidPrice)
            .with_detail("field", "price")
            .with_detail("value", raw)),
    }
}

fn parse_list(field: &'static str, raw: Option<&str>) -> Result<Vec<String>, AppError> {
    attrs::parse_submitted(field, raw).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidAttributeList, e.to_string())
            .with_detail("field", field)
    })
}

/// Read an admin item submission from a multipart body.
///
/// A checkbox named `available` is checked when the part is present with any
/// value other than `off`/`false`. Unknown parts are ignored.
pub async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(ItemForm, MediaUpload), AppError> {
    let mut form = ItemForm::default();
    let mut media = MediaUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image_file" || name == "gallery_files" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::invalid_request(format!("Failed to read upload: {e}")))?;
            let file = UploadedFile {
                file_name,
                content_type,
                bytes,
            };
            if name == "image_file" {
                media.image_file = Some(file);
            } else {
                media.gallery_files.push(file);
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::invalid_request(format!("Invalid field {name}: {e}")))?;

        match name.as_str() {
            "name" => form.name = value,
            "price" => form.price = value,
            "description" => form.description = value,
            "serving_size" => form.serving_size = Some(value),
            "available" => form.available = !matches!(value.as_str(), "off" | "false"),
            "category" => form.category = value,
            "new_category_input" => form.new_category_input = Some(value),
            "ingredients" => form.ingredients = Some(value),
            "allergens" => form.allergens = Some(value),
            "features" => form.features = Some(value),
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok((form, media))
}
