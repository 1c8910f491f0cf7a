//! Admin catalog management

use axum::{
    Extension,
    extract::{Multipart, Path, State},
};
use serde::Serialize;
use shared::{ApiResponse, AppError, AppResult, ErrorCode, attrs};

use crate::api::view::ItemView;
use crate::auth::CurrentAdmin;
use crate::catalog::{CatalogWorkflow, NEW_CATEGORY_SENTINEL, read_multipart};
use crate::core::ServerState;
use crate::db::repository::catalog;

#[derive(Debug, Serialize)]
pub struct AdminListPage {
    pub pastries: Vec<ItemView>,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
}

/// An item prepared for the edit form: list fields as editable JSON text
#[derive(Debug, Serialize)]
pub struct EditableItem {
    #[serde(flatten)]
    pub view: ItemView,
    pub ingredients_str: String,
    pub allergens_str: String,
    pub features_str: String,
}

#[derive(Debug, Serialize)]
pub struct ItemFormPage {
    pub pastry: Option<EditableItem>,
    pub categories: Vec<String>,
    pub new_category_value: &'static str,
}

/// GET /admin/pastries
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<AdminListPage>> {
    list_page(&state, None).await
}

/// GET /admin/pastries/{category}
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<ApiResponse<AdminListPage>> {
    list_page(&state, Some(category)).await
}

async fn list_page(
    state: &ServerState,
    category: Option<String>,
) -> AppResult<ApiResponse<AdminListPage>> {
    let items = match &category {
        Some(category) => catalog::find_by_category(&state.pool, category).await?,
        None => catalog::find_all(&state.pool).await?,
    };

    Ok(ApiResponse::success(AdminListPage {
        pastries: ItemView::many(items, &state.config.order_phone_number),
        categories: catalog::distinct_categories(&state.pool).await?,
        selected_category: category,
    }))
}

/// GET /admin/pastries/add
pub async fn add_form(State(state): State<ServerState>) -> AppResult<ApiResponse<ItemFormPage>> {
    Ok(ApiResponse::success(ItemFormPage {
        pastry: None,
        categories: catalog::distinct_categories(&state.pool).await?,
        new_category_value: NEW_CATEGORY_SENTINEL,
    }))
}

/// POST /admin/pastries/add (multipart)
pub async fn add(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    multipart: Multipart,
) -> AppResult<ApiResponse<ItemView>> {
    let (form, media) = read_multipart(multipart).await?;
    let item = CatalogWorkflow::new(&state.pool, &state.images)
        .add(form, media)
        .await?;

    tracing::info!(admin = %admin.username, id = item.id, "Admin added pastry");
    Ok(ApiResponse::success_with_message(
        format!("Pastry \"{}\" added successfully!", item.name),
        ItemView::new(item, &state.config.order_phone_number),
    ))
}

/// GET /admin/pastries/edit/{id}
pub async fn edit_form(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<ItemFormPage>> {
    let Some(item) = catalog::find_by_id(&state.pool, id).await? else {
        return Err(not_found(id));
    };

    let editable = EditableItem {
        ingredients_str: attrs::encode(&item.ingredients),
        allergens_str: attrs::encode(&item.allergens),
        features_str: attrs::encode(&item.features),
        view: ItemView::new(item, &state.config.order_phone_number),
    };

    Ok(ApiResponse::success(ItemFormPage {
        pastry: Some(editable),
        categories: catalog::distinct_categories(&state.pool).await?,
        new_category_value: NEW_CATEGORY_SENTINEL,
    }))
}

/// POST /admin/pastries/edit/{id} (multipart)
pub async fn edit(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<ApiResponse<ItemView>> {
    let (form, media) = read_multipart(multipart).await?;
    let item = CatalogWorkflow::new(&state.pool, &state.images)
        .edit(id, form, media)
        .await?;

    tracing::info!(admin = %admin.username, id, "Admin updated pastry");
    Ok(ApiResponse::success_with_message(
        format!("Pastry \"{}\" updated successfully!", item.name),
        ItemView::new(item, &state.config.order_phone_number),
    ))
}

/// GET /admin/pastries/delete/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<()>> {
    let removed = CatalogWorkflow::new(&state.pool, &state.images)
        .delete(id)
        .await?;

    tracing::info!(admin = %admin.username, id, "Admin deleted pastry");
    Ok(ApiResponse::ok_with_message(format!(
        "Pastry \"{}\" deleted successfully!",
        removed.name
    )))
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ItemNotFound, format!("Pastry {id} not found"))
        .with_detail("id", id)
}
