//! Storefront pages
//!
//! | Path | Method | Description |
//! |------|--------|-------------|
//! | / | GET | featured items and categories |
//! | /pastries | GET | full catalog |
//! | /pastries/{category} | GET | one category |
//! | /pastry/{id} | GET | item detail with related items |
//! | /about | GET | business information |
//! | /contact | GET, POST | contact details, contact form |

use axum::{
    Form, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

use crate::api::view::ItemView;
use crate::core::ServerState;
use crate::db::repository::catalog;
use crate::mail::ContactMessage;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_MESSAGE_LEN, MAX_NAME_LEN, MAX_SUBJECT_LEN, clip_text,
};

/// Items shown on the home page
const FEATURED_LIMIT: i64 = 6;

/// Related items shown on a detail page
const RELATED_LIMIT: i64 = 3;

const DEEP_LINK_BASE: &str = "https://wa.me";

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/", get(home))
        .route("/pastries", get(pastries))
        .route("/pastries/{category}", get(pastries_by_category))
        .route("/pastry/{id}", get(pastry_detail))
        .route("/about", get(about))
        .route("/contact", get(contact_info).post(contact_submit))
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub featured_pastries: Vec<ItemView>,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub pastries: Vec<ItemView>,
    pub category: Option<String>,
    pub all_categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailPage {
    pub pastry: ItemView,
    pub related_pastries: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct BusinessInfo {
    pub business_name: String,
    pub order_number: String,
    pub chat_link: String,
}

#[derive(Debug, Serialize)]
pub struct ContactPage {
    #[serde(flatten)]
    pub business: BusinessInfo,
    pub message_sent: bool,
}

/// Contact form; missing fields are accepted as empty
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

async fn home(State(state): State<ServerState>) -> AppResult<ApiResponse<HomePage>> {
    let featured = catalog::find_available(&state.pool, FEATURED_LIMIT).await?;
    let categories = catalog::distinct_categories(&state.pool).await?;

    Ok(ApiResponse::success(HomePage {
        featured_pastries: ItemView::many(featured, &state.config.order_phone_number),
        categories,
    }))
}

async fn pastries(State(state): State<ServerState>) -> AppResult<ApiResponse<CatalogPage>> {
    catalog_page(&state, None).await
}

async fn pastries_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<ApiResponse<CatalogPage>> {
    catalog_page(&state, Some(category)).await
}

async fn catalog_page(
    state: &ServerState,
    category: Option<String>,
) -> AppResult<ApiResponse<CatalogPage>> {
    let items = match &category {
        Some(category) => catalog::find_by_category(&state.pool, category).await?,
        None => catalog::find_all(&state.pool).await?,
    };
    let all_categories = catalog::distinct_categories(&state.pool).await?;

    Ok(ApiResponse::success(CatalogPage {
        pastries: ItemView::many(items, &state.config.order_phone_number),
        category,
        all_categories,
    }))
}

async fn pastry_detail(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<ApiResponse<DetailPage>> {
    let Some(item) = catalog::find_by_id(&state.pool, id).await? else {
        return Err(
            AppError::with_message(ErrorCode::ItemNotFound, format!("Pastry {id} not found"))
                .with_detail("id", id),
        );
    };

    let related = catalog::find_related(&state.pool, &item.category, item.id, RELATED_LIMIT).await?;
    let number = &state.config.order_phone_number;

    Ok(ApiResponse::success(DetailPage {
        pastry: ItemView::new(item, number),
        related_pastries: ItemView::many(related, number),
    }))
}

fn business_info(state: &ServerState) -> BusinessInfo {
    let number = state.config.order_phone_number.trim();
    BusinessInfo {
        business_name: state.config.business_name.clone(),
        order_number: number.to_string(),
        chat_link: format!("{DEEP_LINK_BASE}/{number}"),
    }
}

async fn about(State(state): State<ServerState>) -> ApiResponse<BusinessInfo> {
    ApiResponse::success(business_info(&state))
}

async fn contact_info(State(state): State<ServerState>) -> ApiResponse<ContactPage> {
    ApiResponse::success(ContactPage {
        business: business_info(&state),
        message_sent: false,
    })
}

/// Queue the notification and report success; delivery happens in the
/// background. Over-long fields are cut to their limits.
async fn contact_submit(
    State(state): State<ServerState>,
    Form(form): Form<ContactForm>,
) -> ApiResponse<ContactPage> {
    state.mail.enqueue(ContactMessage {
        name: clip_text(&form.name, MAX_NAME_LEN),
        email: clip_text(&form.email, MAX_EMAIL_LEN),
        subject: clip_text(&form.subject, MAX_SUBJECT_LEN),
        message: clip_text(&form.message, MAX_MESSAGE_LEN),
    });

    ApiResponse::success_with_message(
        "Your message has been sent successfully!",
        ContactPage {
            business: business_info(&state),
            message_sent: true,
        },
    )
}
