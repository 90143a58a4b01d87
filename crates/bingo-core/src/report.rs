//! # Dashboard Reports
//!
//! Aggregation over raw sale rows for the admin dashboard. The database
//! layer reads the rows, this module turns them into what the page shows.

use std::collections::HashMap;

use crate::money::Money;
use crate::types::{
    DashboardSummary, ProductSaleRow, ProductSales, SaleDetail, SaleDetailRow, SaleHeaderRow,
    SaleWithDetails,
};
use crate::{UNKNOWN_CASHIER, UNKNOWN_PRODUCT};

/// Totals over every sale subtotal.
pub fn summarize(subtotals: &[i64]) -> DashboardSummary {
    let total_revenue: Money = subtotals.iter().copied().map(Money::from_pesos).sum();

    DashboardSummary {
        total_revenue: total_revenue.pesos(),
        total_sales: subtotals.len() as i64,
    }
}

/// Sums units and revenue per product, best sellers first.
///
/// Rows whose product no longer resolves are skipped. Ties on units are
/// broken by name so the order is stable.
pub fn aggregate_product_sales(rows: &[ProductSaleRow]) -> Vec<ProductSales> {
    let mut by_product: HashMap<i64, ProductSales> = HashMap::new();

    for row in rows {
        let (Some(product_id), Some(name)) = (row.product_id, row.product_name.as_ref()) else {
            continue;
        };

        let entry = by_product.entry(product_id).or_insert_with(|| ProductSales {
            product_id,
            name: name.clone(),
            units_sold: 0,
            revenue: 0,
        });
        entry.units_sold += row.quantity;
        entry.revenue += row.subtotal;
    }

    let mut sales: Vec<ProductSales> = by_product.into_values().collect();
    sales.sort_by(|a, b| {
        b.units_sold
            .cmp(&a.units_sold)
            .then_with(|| a.name.cmp(&b.name))
    });
    sales
}

/// Attaches line items to their sale headers.
///
/// Header order is preserved. Missing cashier or product names fall back
/// to `UNKNOWN_CASHIER` and `UNKNOWN_PRODUCT`.
pub fn group_sale_details(
    headers: Vec<SaleHeaderRow>,
    details: Vec<SaleDetailRow>,
) -> Vec<SaleWithDetails> {
    let mut by_sale: HashMap<i64, Vec<SaleDetail>> = HashMap::new();

    for row in details {
        by_sale.entry(row.sale_id).or_default().push(SaleDetail {
            id: row.id,
            product_id: row.product_id,
            product_name: row
                .product_name
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            quantity: row.quantity,
            unit_price: row.unit_price,
            subtotal: row.subtotal,
        });
    }

    headers
        .into_iter()
        .map(|h| SaleWithDetails {
            details: by_sale.remove(&h.id).unwrap_or_default(),
            id: h.id,
            cashier_id: h.cashier_id,
            cashier_name: h.cashier_name.unwrap_or_else(|| UNKNOWN_CASHIER.to_string()),
            subtotal: h.subtotal,
            cash_received: h.cash_received,
            change: h.change,
            created_at: h.created_at,
        })
        .collect()
}
