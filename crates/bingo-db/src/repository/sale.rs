//! # Sale Repository
//!
//! Database operations for `ventas` (headers) and `detalle_ventas`
//! (line items).
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. INSERT HEADER                                                      │
//! │     └── insert_header() → store-generated id                           │
//! │                                                                         │
//! │  2. INSERT LINE ITEMS (one statement)                                  │
//! │     └── insert_line_items() → all rows or none                         │
//! │                                                                         │
//! │  2b. ON FAILURE: COMPENSATE                                            │
//! │     └── delete_line_items() then delete_header()                       │
//! │                                                                         │
//! │  3. READ BACK                                                          │
//! │     └── get_receipt() → header + cashier name + line items             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1 to 2b are driven by [`SaleWriter`](crate::writer::SaleWriter)
//! through the [`SaleStore`] trait.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::SaleStore;
use bingo_core::report::group_sale_details;
use bingo_core::{
    NewSaleHeader, NewSaleLineItem, SaleDetailRow, SaleHeader, SaleHeaderRow, SaleId,
    SaleLineItem, SaleWithDetails,
};

/// Sale headers joined with the cashier's name.
pub(crate) const SALE_HEADER_ROWS: &str = r#"
    SELECT
        v.id,
        v.cajero_id         AS cashier_id,
        c.nombre_completo   AS cashier_name,
        v.subtotal,
        v.efectivo_recibido AS cash_received,
        v.cambio            AS change,
        v.fecha_venta       AS created_at
    FROM ventas v
    LEFT JOIN cajeros c ON c.id = v.cajero_id
"#;

/// Line items joined with the product's name.
pub(crate) const SALE_DETAIL_ROWS: &str = r#"
    SELECT
        d.id,
        d.venta_id        AS sale_id,
        d.producto_id     AS product_id,
        p.nombre          AS product_name,
        d.cantidad        AS quantity,
        d.precio_unitario AS unit_price,
        d.subtotal
    FROM detalle_ventas d
    LEFT JOIN productos p ON p.id = d.producto_id
"#;

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale header by ID.
    pub async fn get_header(&self, id: SaleId) -> DbResult<Option<SaleHeader>> {
        let header = sqlx::query_as::<_, SaleHeader>(
            r#"
            SELECT
                id,
                cajero_id         AS cashier_id,
                subtotal,
                efectivo_recibido AS cash_received,
                cambio            AS change,
                fecha_venta       AS created_at
            FROM ventas
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(header)
    }

    /// Gets all line items of a sale, in insertion order.
    pub async fn get_items(&self, sale_id: SaleId) -> DbResult<Vec<SaleLineItem>> {
        let items = sqlx::query_as::<_, SaleLineItem>(
            r#"
            SELECT
                id,
                venta_id        AS sale_id,
                producto_id     AS product_id,
                cantidad        AS quantity,
                precio_unitario AS unit_price,
                subtotal
            FROM detalle_ventas
            WHERE venta_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Loads a recorded sale as a receipt: header, cashier name, and the
    /// line items with product names.
    pub async fn get_receipt(&self, id: SaleId) -> DbResult<Option<SaleWithDetails>> {
        let header_sql = format!("{SALE_HEADER_ROWS} WHERE v.id = ?1");
        let Some(header) = sqlx::query_as::<_, SaleHeaderRow>(&header_sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let detail_sql = format!("{SALE_DETAIL_ROWS} WHERE d.venta_id = ?1 ORDER BY d.id");
        let details = sqlx::query_as::<_, SaleDetailRow>(&detail_sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(group_sale_details(vec![header], details).into_iter().next())
    }

    /// Counts sale headers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ventas")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl SaleStore for SaleRepository {
    async fn insert_header(&self, header: &NewSaleHeader) -> DbResult<SaleId> {
        debug!(
            cashier_id = header.cashier_id,
            subtotal = header.subtotal,
            "Inserting sale header"
        );

        let id: Option<SaleId> = sqlx::query_scalar(
            r#"
            INSERT INTO ventas (cajero_id, subtotal, efectivo_recibido, cambio)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(header.cashier_id)
        .bind(header.subtotal)
        .bind(header.cash_received)
        .bind(header.change)
        .fetch_optional(&self.pool)
        .await?;

        id.ok_or_else(|| DbError::not_found("Sale", "generated id"))
    }

    async fn insert_line_items(&self, items: &[NewSaleLineItem]) -> DbResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        debug!(count = items.len(), sale_id = items[0].sale_id, "Inserting line items");

        // One multi-row INSERT: SQLite applies it entirely or not at all.
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO detalle_ventas (venta_id, producto_id, cantidad, precio_unitario, subtotal) ",
        );
        builder.push_values(items, |mut row, item| {
            row.push_bind(item.sale_id)
                .push_bind(item.product_id)
                .push_bind(item.quantity)
                .push_bind(item.unit_price)
                .push_bind(item.subtotal);
        });

        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    async fn delete_line_items(&self, sale_id: SaleId) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM detalle_ventas WHERE venta_id = ?1")
            .bind(sale_id)
            .execute(&self.pool)
            .await?;

        debug!(sale_id, deleted = result.rows_affected(), "Deleted line items");
        Ok(result.rows_affected())
    }

    async fn delete_header(&self, sale_id: SaleId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM ventas WHERE id = ?1")
            .bind(sale_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", sale_id));
        }

        debug!(sale_id, "Deleted sale header");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::cashier::NewCashier;
    use crate::{Database, DbConfig};
    use bingo_core::{ProductInput, Role};

    async fn setup() -> (Database, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let cashier = db
            .cashiers()
            .insert(&NewCashier {
                username: "ana".to_string(),
                full_name: "Ana Gómez".to_string(),
                password: "secreto".to_string(),
                role: Role::Cashier,
            })
            .await
            .unwrap();

        let product = db
            .products()
            .insert(&ProductInput {
                name: "Empanada".to_string(),
                price: 2500,
                image_url: None,
                active: true,
            })
            .await
            .unwrap();

        (db, cashier.id, product.id)
    }

    fn header(cashier_id: i64) -> NewSaleHeader {
        NewSaleHeader {
            cashier_id,
            subtotal: 5000,
            cash_received: 10000,
            change: 5000,
        }
    }

    #[tokio::test]
    async fn test_insert_header_returns_generated_id() {
        let (db, cashier_id, _) = setup().await;
        let repo = db.sales();

        let first = repo.insert_header(&header(cashier_id)).await.unwrap();
        let second = repo.insert_header(&header(cashier_id)).await.unwrap();
        assert_ne!(first, second);

        let stored = repo.get_header(first).await.unwrap().unwrap();
        assert_eq!(stored.cashier_id, cashier_id);
        assert_eq!(stored.cash_received, 10000);
        assert_eq!(stored.change, 5000);
    }

    #[tokio::test]
    async fn test_insert_line_items_batch() {
        let (db, cashier_id, product_id) = setup().await;
        let repo = db.sales();

        let sale_id = repo.insert_header(&header(cashier_id)).await.unwrap();
        let items = vec![
            NewSaleLineItem {
                sale_id,
                product_id,
                quantity: 1,
                unit_price: 2500,
                subtotal: 2500,
            },
            NewSaleLineItem {
                sale_id,
                product_id,
                quantity: 1,
                unit_price: 2000,
                subtotal: 2000,
            },
        ];
        repo.insert_line_items(&items).await.unwrap();

        let stored = repo.get_items(sale_id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].unit_price, 2500);
        assert_eq!(stored[1].unit_price, 2000);
    }

    #[tokio::test]
    async fn test_batch_with_bad_row_inserts_nothing() {
        let (db, cashier_id, product_id) = setup().await;
        let repo = db.sales();

        let sale_id = repo.insert_header(&header(cashier_id)).await.unwrap();
        let good = NewSaleLineItem {
            sale_id,
            product_id,
            quantity: 1,
            unit_price: 2500,
            subtotal: 2500,
        };
        let bad = NewSaleLineItem {
            product_id: 9999,
            ..good
        };

        let err = repo.insert_line_items(&[good, bad]).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(repo.get_items(sale_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let (db, _, _) = setup().await;
        db.sales().insert_line_items(&[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_header_and_items() {
        let (db, cashier_id, product_id) = setup().await;
        let repo = db.sales();

        let sale_id = repo.insert_header(&header(cashier_id)).await.unwrap();
        repo.insert_line_items(&[NewSaleLineItem {
            sale_id,
            product_id,
            quantity: 2,
            unit_price: 2500,
            subtotal: 5000,
        }])
        .await
        .unwrap();

        assert_eq!(repo.delete_line_items(sale_id).await.unwrap(), 1);
        repo.delete_header(sale_id).await.unwrap();

        assert!(repo.get_header(sale_id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete_header(sale_id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_header_with_items_cannot_be_deleted_first() {
        let (db, cashier_id, product_id) = setup().await;
        let repo = db.sales();

        let sale_id = repo.insert_header(&header(cashier_id)).await.unwrap();
        repo.insert_line_items(&[NewSaleLineItem {
            sale_id,
            product_id,
            quantity: 2,
            unit_price: 2500,
            subtotal: 5000,
        }])
        .await
        .unwrap();

        let err = repo.delete_header(sale_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_get_receipt() {
        let (db, cashier_id, product_id) = setup().await;
        let repo = db.sales();

        let sale_id = repo.insert_header(&header(cashier_id)).await.unwrap();
        repo.insert_line_items(&[NewSaleLineItem {
            sale_id,
            product_id,
            quantity: 2,
            unit_price: 2500,
            subtotal: 5000,
        }])
        .await
        .unwrap();

        let receipt = repo.get_receipt(sale_id).await.unwrap().unwrap();
        assert_eq!(receipt.id, sale_id);
        assert_eq!(receipt.cashier_name, "Ana Gómez");
        assert_eq!(receipt.details.len(), 1);
        assert_eq!(receipt.details[0].product_name, "Empanada");
        assert_eq!(receipt.details[0].subtotal, 5000);

        assert!(repo.get_receipt(sale_id + 1).await.unwrap().is_none());
    }
}
