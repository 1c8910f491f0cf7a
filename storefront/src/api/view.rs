//! View models shared by public and admin pages

use serde::Serialize;
use shared::models::CatalogItem;
use shared::util::format_price;

use crate::utils::order_link;

/// An item as a page shows it: the stored fields plus resolved URLs
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub image_url: String,
    pub gallery_urls: Vec<String>,
    /// Price with thousands separators, no currency sign
    pub price_display: String,
    pub order_link: String,
}

impl ItemView {
    pub fn new(item: CatalogItem, order_number: &str) -> Self {
        Self {
            image_url: item.image_url(),
            gallery_urls: item.gallery_urls(),
            price_display: format_price(item.price),
            order_link: order_link(order_number, &item.name, item.price),
            item,
        }
    }

    pub fn many(items: Vec<CatalogItem>, order_number: &str) -> Vec<Self> {
        items
            .into_iter()
            .map(|item| Self::new(item, order_number))
            .collect()
    }
}
