//! Admin dashboard

use axum::{Extension, extract::State};
use serde::Serialize;
use shared::models::CategoryCount;
use shared::{ApiResponse, AppResult};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::repository::catalog;

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub admin: CurrentAdmin,
    pub total_pastries: i64,
    pub total_categories: usize,
    /// Sum of list prices over the whole catalog
    pub total_value: f64,
    pub available: i64,
    pub category_counts: Vec<CategoryCount>,
}

/// GET /admin
pub async fn show(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
) -> AppResult<ApiResponse<DashboardPage>> {
    let items = catalog::find_all(&state.pool).await?;
    let category_counts = catalog::category_counts(&state.pool).await?;

    Ok(ApiResponse::success(DashboardPage {
        admin,
        total_pastries: catalog::count_all(&state.pool).await?,
        total_categories: category_counts.len(),
        total_value: catalog::sum_of_price(&items),
        available: catalog::count_available(&state.pool).await?,
        category_counts,
    }))
}
