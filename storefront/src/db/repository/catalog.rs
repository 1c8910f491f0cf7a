//! Catalog Repository

use super::{RepoError, RepoResult};
use shared::attrs;
use shared::models::{CatalogItem, CatalogItemCreate, CategoryCount};
use sqlx::SqlitePool;

const SELECT_ITEM: &str = "SELECT id, name, category, price, image, description, serving_size, \
     available, gallery_json, ingredients_json, allergens_json, features_json, created_at, \
     updated_at FROM pastry";

/// Raw `pastry` row; list attributes are still encoded
#[derive(Debug, sqlx::FromRow)]
struct PastryRow {
    id: i64,
    name: String,
    category: String,
    price: f64,
    image: String,
    description: String,
    serving_size: Option<String>,
    available: bool,
    gallery_json: Option<String>,
    ingredients_json: Option<String>,
    allergens_json: Option<String>,
    features_json: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl From<PastryRow> for CatalogItem {
    fn from(row: PastryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            price: row.price,
            image: row.image,
            description: row.description,
            serving_size: row.serving_size,
            available: row.available,
            gallery: attrs::decode(row.gallery_json.as_deref()),
            ingredients: attrs::decode(row.ingredients_json.as_deref()),
            allergens: attrs::decode(row.allergens_json.as_deref()),
            features: attrs::decode(row.features_json.as_deref()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn into_items(rows: Vec<PastryRow>) -> Vec<CatalogItem> {
    rows.into_iter().map(CatalogItem::from).collect()
}

// ── Reads ───────────────────────────────────────────────────────────

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<CatalogItem>> {
    let sql = format!("{SELECT_ITEM} WHERE id = ?");
    let row = sqlx::query_as::<_, PastryRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(CatalogItem::from))
}

/// Like [`find_by_id`] but a missing item is an error
pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<CatalogItem> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Pastry {id} not found")))
}

/// All items in insertion order
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<CatalogItem>> {
    let sql = format!("{SELECT_ITEM} ORDER BY id");
    let rows = sqlx::query_as::<_, PastryRow>(&sql).fetch_all(pool).await?;
    Ok(into_items(rows))
}

pub async fn find_by_category(pool: &SqlitePool, category: &str) -> RepoResult<Vec<CatalogItem>> {
    let sql = format!("{SELECT_ITEM} WHERE category = ? ORDER BY id");
    let rows = sqlx::query_as::<_, PastryRow>(&sql)
        .bind(category)
        .fetch_all(pool)
        .await?;
    Ok(into_items(rows))
}

/// Available items, at most `limit`
pub async fn find_available(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<CatalogItem>> {
    let sql = format!("{SELECT_ITEM} WHERE available = 1 ORDER BY id LIMIT ?");
    let rows = sqlx::query_as::<_, PastryRow>(&sql)
        .bind(limit.max(0))
        .fetch_all(pool)
        .await?;
    Ok(into_items(rows))
}

/// Items sharing `category`, excluding `exclude_id`, at most `limit`
pub async fn find_related(
    pool: &SqlitePool,
    category: &str,
    exclude_id: i64,
    limit: i64,
) -> RepoResult<Vec<CatalogItem>> {
    let sql = format!("{SELECT_ITEM} WHERE category = ? AND id != ? ORDER BY id LIMIT ?");
    let rows = sqlx::query_as::<_, PastryRow>(&sql)
        .bind(category)
        .bind(exclude_id)
        .bind(limit.max(0))
        .fetch_all(pool)
        .await?;
    Ok(into_items(rows))
}

/// Distinct category labels, in order of first appearance
pub async fn distinct_categories(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let categories = sqlx::query_scalar::<_, String>(
        "SELECT category FROM pastry GROUP BY category ORDER BY MIN(id)",
    )
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn count_all(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pastry")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_by_category(pool: &SqlitePool, category: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pastry WHERE category = ?")
        .bind(category)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_available(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pastry WHERE available = 1")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Item count per category, in order of first appearance
pub async fn category_counts(pool: &SqlitePool) -> RepoResult<Vec<CategoryCount>> {
    let counts = sqlx::query_as::<_, CategoryCount>(
        "SELECT category, COUNT(*) AS count FROM pastry GROUP BY category ORDER BY MIN(id)",
    )
    .fetch_all(pool)
    .await?;
    Ok(counts)
}

/// Sum of list prices
pub fn sum_of_price(items: &[CatalogItem]) -> f64 {
    items.iter().map(|item| item.price).sum()
}

// ── Writes ──────────────────────────────────────────────────────────

async fn insert_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    data: &CatalogItemCreate,
    now: i64,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO pastry (name, category, price, image, description, serving_size, available, \
         gallery_json, ingredients_json, allergens_json, features_json, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(data.price)
    .bind(&data.image)
    .bind(&data.description)
    .bind(&data.serving_size)
    .bind(data.available)
    .bind(attrs::encode(&data.gallery))
    .bind(attrs::encode(&data.ingredients))
    .bind(attrs::encode(&data.allergens))
    .bind(attrs::encode(&data.features))
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

pub async fn create(pool: &SqlitePool, data: CatalogItemCreate) -> RepoResult<CatalogItem> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    let id = insert_in_tx(&mut tx, &data, now).await?;
    tx.commit().await?;

    get_by_id(pool, id)
        .await
        .map_err(|_| RepoError::Database("Failed to create pastry".into()))
}

/// Insert a batch atomically; either every item is stored or none is
pub async fn create_many(pool: &SqlitePool, items: &[CatalogItemCreate]) -> RepoResult<usize> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    for data in items {
        insert_in_tx(&mut tx, data, now).await?;
    }
    tx.commit().await?;
    Ok(items.len())
}

/// Persist every mutable field of `item`
pub async fn update(pool: &SqlitePool, item: &CatalogItem) -> RepoResult<CatalogItem> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE pastry SET name = ?1, category = ?2, price = ?3, image = ?4, description = ?5, \
         serving_size = ?6, available = ?7, gallery_json = ?8, ingredients_json = ?9, \
         allergens_json = ?10, features_json = ?11, updated_at = ?12 WHERE id = ?13",
    )
    .bind(&item.name)
    .bind(&item.category)
    .bind(item.price)
    .bind(&item.image)
    .bind(&item.description)
    .bind(&item.serving_size)
    .bind(item.available)
    .bind(attrs::encode(&item.gallery))
    .bind(attrs::encode(&item.ingredients))
    .bind(attrs::encode(&item.allergens))
    .bind(attrs::encode(&item.features))
    .bind(now)
    .bind(item.id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Pastry {} not found", item.id)));
    }

    tx.commit().await?;

    get_by_id(pool, item.id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    let rows = sqlx::query("DELETE FROM pastry WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Pastry {id} not found")));
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn item(name: &str, category: &str, price: f64, available: bool) -> CatalogItemCreate {
        CatalogItemCreate {
            name: name.to_string(),
            category: category.to_string(),
            price,
            image: format!("{}.jpg", name.to_lowercase().replace(' ', "-")),
            description: format!("{name} description"),
            serving_size: Some("6 pieces".to_string()),
            available,
            gallery: Vec::new(),
            ingredients: vec!["Flour".to_string(), "Butter, salted".to_string()],
            allergens: vec!["Gluten".to_string()],
            features: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_round_trips_lists() {
        let pool = pool().await;
        let created = create(&pool, item("Croissants", "Pastries", 1500.0, true))
            .await
            .unwrap();

        let loaded = get_by_id(&pool, created.id).await.unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.ingredients, vec!["Flour", "Butter, salted"]);
        assert!(loaded.gallery.is_empty());
        assert!(loaded.created_at > 0);
    }

    #[tokio::test]
    async fn test_find_available_limits_and_filters() {
        let pool = pool().await;
        for i in 0..8 {
            create(&pool, item(&format!("Cake {i}"), "Cakes", 100.0, i % 4 != 0))
                .await
                .unwrap();
        }

        let featured = find_available(&pool, 6).await.unwrap();
        assert_eq!(featured.len(), 6);
        assert!(featured.iter().all(|p| p.available));
        assert_eq!(count_available(&pool).await.unwrap(), 6);
        assert_eq!(find_available(&pool, 3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_related_excludes_self() {
        let pool = pool().await;
        let a = create(&pool, item("Glazed Donuts", "Donuts", 2000.0, true))
            .await
            .unwrap();
        create(&pool, item("Chocolate Frosted Donuts", "Donuts", 2500.0, true))
            .await
            .unwrap();
        create(&pool, item("Croissants", "Pastries", 1500.0, true))
            .await
            .unwrap();

        let related = find_related(&pool, "Donuts", a.id, 3).await.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].name, "Chocolate Frosted Donuts");
    }

    #[tokio::test]
    async fn test_categories_and_counts() {
        let pool = pool().await;
        create(&pool, item("A", "Cakes", 1.0, true)).await.unwrap();
        create(&pool, item("B", "Bread", 1.0, true)).await.unwrap();
        create(&pool, item("C", "Cakes", 1.0, false)).await.unwrap();

        assert_eq!(distinct_categories(&pool).await.unwrap(), vec!["Cakes", "Bread"]);
        assert_eq!(count_all(&pool).await.unwrap(), 3);
        assert_eq!(count_by_category(&pool, "Cakes").await.unwrap(), 2);
        assert_eq!(
            category_counts(&pool).await.unwrap(),
            vec![
                CategoryCount { category: "Cakes".into(), count: 2 },
                CategoryCount { category: "Bread".into(), count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_sum_of_price() {
        let pool = pool().await;
        for (name, price) in [
            ("Chocolate Fudge Cake", 15000.0),
            ("Red Velvet Cake", 18000.0),
            ("Vanilla Sponge Cake", 12000.0),
        ] {
            create(&pool, item(name, "Cakes", price, true)).await.unwrap();
        }
        let items = find_all(&pool).await.unwrap();
        assert_eq!(sum_of_price(&items), 45000.0);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = pool().await;
        let mut created = create(&pool, item("Meat Pies", "Pastries", 2500.0, true))
            .await
            .unwrap();

        created.price = 2700.0;
        created.features = vec!["Nigerian favorite".to_string()];
        let updated = update(&pool, &created).await.unwrap();
        assert_eq!(updated.price, 2700.0);
        assert_eq!(updated.features, vec!["Nigerian favorite"]);

        delete(&pool, created.id).await.unwrap();
        assert!(find_by_id(&pool, created.id).await.unwrap().is_none());
        assert!(matches!(
            delete(&pool, created.id).await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_check_constraint_rolls_back() {
        let pool = pool().await;
        let mut bad = item("X", "Cakes", 1.0, true);
        bad.name = "x".repeat(101);
        assert!(create(&pool, bad).await.is_err());
        assert_eq!(count_all(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_list_column_decodes_empty() {
        let pool = pool().await;
        let created = create(&pool, item("Sourdough", "Bread", 2500.0, true))
            .await
            .unwrap();
        sqlx::query("UPDATE pastry SET allergens_json = 'not json' WHERE id = ?")
            .bind(created.id)
            .execute(&pool)
            .await
            .unwrap();

        let loaded = get_by_id(&pool, created.id).await.unwrap();
        assert!(loaded.allergens.is_empty());
        assert_eq!(loaded.ingredients, vec!["Flour", "Butter, salted"]);
    }
}
