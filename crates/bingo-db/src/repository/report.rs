//! # Report Repository
//!
//! Reads for the admin dashboard. Aggregation lives in
//! [`bingo_core::report`]; this module only fetches rows.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::sale::{SALE_DETAIL_ROWS, SALE_HEADER_ROWS};
use bingo_core::report::{aggregate_product_sales, group_sale_details, summarize};
use bingo_core::{
    DashboardSummary, ProductSaleRow, ProductSales, SaleDetailRow, SaleHeaderRow, SaleWithDetails,
};

/// Repository for dashboard reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Total revenue and number of sales.
    pub async fn summary(&self) -> DbResult<DashboardSummary> {
        let subtotals: Vec<i64> = sqlx::query_scalar("SELECT subtotal FROM ventas")
            .fetch_all(&self.pool)
            .await?;

        debug!(sales = subtotals.len(), "Loaded sale subtotals");
        Ok(summarize(&subtotals))
    }

    /// Raw line-item rows joined with product names.
    pub async fn product_sales_rows(&self) -> DbResult<Vec<ProductSaleRow>> {
        let rows = sqlx::query_as::<_, ProductSaleRow>(
            r#"
            SELECT
                p.id        AS product_id,
                p.nombre    AS product_name,
                d.cantidad  AS quantity,
                d.subtotal
            FROM detalle_ventas d
            LEFT JOIN productos p ON p.id = d.producto_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Units and revenue per product, best sellers first.
    pub async fn product_sales(&self) -> DbResult<Vec<ProductSales>> {
        let rows = self.product_sales_rows().await?;
        Ok(aggregate_product_sales(&rows))
    }

    /// Every sale with cashier name and line items, newest first.
    pub async fn all_sales(&self) -> DbResult<Vec<SaleWithDetails>> {
        let header_sql = format!("{SALE_HEADER_ROWS} ORDER BY v.fecha_venta DESC, v.id DESC");
        let headers = sqlx::query_as::<_, SaleHeaderRow>(&header_sql)
            .fetch_all(&self.pool)
            .await?;

        let detail_sql = format!("{SALE_DETAIL_ROWS} ORDER BY d.id");
        let details = sqlx::query_as::<_, SaleDetailRow>(&detail_sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(
            sales = headers.len(),
            line_items = details.len(),
            "Loaded sales history"
        );
        Ok(group_sale_details(headers, details))
    }
}
