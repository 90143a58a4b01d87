//! # Product Repository
//!
//! Database operations for the `productos` table.
//!
//! ## Key Operations
//! - Menu listing (all, or active only), ordered by name
//! - Create and update from the admin product form
//!
//! Products are never deleted. Sales reference them, so the admin flips
//! `active` off instead.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use bingo_core::{Product, ProductInput};

/// Column list shared by every product read, aliased to `Product` fields.
const PRODUCT_COLUMNS: &str = r#"
    id,
    nombre      AS name,
    precio      AS price,
    imagen_url  AS image_url,
    activo      AS active,
    created_at
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let menu = repo.list_active().await?;
/// let product = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, active or not, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM productos ORDER BY nombre, id");

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Lists the products a cashier can sell, ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM productos WHERE activo = 1 ORDER BY nombre, id"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed active products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM productos WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// The input is expected to be validated already
    /// (see [`ProductInput::normalized`]).
    ///
    /// ## Returns
    /// The stored product with its generated id and timestamp.
    pub async fn insert(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(name = %input.name, price = input.price, "Inserting product");

        let sql = format!(
            "INSERT INTO productos (nombre, precio, imagen_url, activo) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {PRODUCT_COLUMNS}"
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(input.active)
            .fetch_one(&self.pool)
            .await?;

        Ok(product)
    }

    /// Replaces a product's editable fields.
    ///
    /// Past sales keep the price they were sold at; only new carts see the
    /// change.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated product
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        debug!(id, name = %input.name, "Updating product");

        let sql = format!(
            "UPDATE productos SET nombre = ?2, precio = ?3, imagen_url = ?4, activo = ?5 \
             WHERE id = ?1 \
             RETURNING {PRODUCT_COLUMNS}"
        );

        sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.image_url)
            .bind(input.active)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Counts active products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos WHERE activo = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn input(name: &str, price: i64, active: bool) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price,
            image_url: None,
            active,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let created = repo.insert(&input("Empanada", 2500, true)).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Empanada");
        assert!(created.active);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        assert!(repo.get_by_id(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_name_and_filters_inactive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&input("Gaseosa", 3000, true)).await.unwrap();
        repo.insert(&input("Arepa", 2000, true)).await.unwrap();
        repo.insert(&input("Buñuelo", 1000, false)).await.unwrap();

        let all: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(all, vec!["Arepa", "Buñuelo", "Gaseosa"]);

        let active: Vec<String> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(active, vec!["Arepa", "Gaseosa"]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let created = repo.insert(&input("Tinto", 1000, true)).await.unwrap();

        let mut changes = input("Tinto grande", 1500, false);
        changes.image_url = Some("https://example.com/tinto.png".to_string());
        let updated = repo.update(created.id, &changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Tinto grande");
        assert_eq!(updated.price, 1500);
        assert!(!updated.active);
        assert_eq!(updated.image_url.as_deref(), Some("https://example.com/tinto.png"));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .products()
            .update(999, &input("Nada", 1, true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_negative_price_rejected_by_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .products()
            .insert(&input("Regalo", -1, true))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
