//! # Sale Store
//!
//! The four store operations the sale writer needs, and nothing else.
//!
//! Each call is its own autocommitted statement. There is no transaction
//! spanning two calls, which is why the writer compensates by hand.

use async_trait::async_trait;
use bingo_core::{NewSaleHeader, NewSaleLineItem, SaleId};

use crate::error::DbResult;

/// Data store seam used by [`SaleWriter`](crate::writer::SaleWriter).
///
/// [`SaleRepository`](crate::repository::sale::SaleRepository) is the
/// SQLite implementation. Tests plug in an in-memory fake.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Inserts a sale header and returns the id the store generated.
    ///
    /// Returns `DbError::NotFound` if the store accepted the insert but
    /// produced no id.
    async fn insert_header(&self, header: &NewSaleHeader) -> DbResult<SaleId>;

    /// Inserts every line item in one batched call.
    async fn insert_line_items(&self, items: &[NewSaleLineItem]) -> DbResult<()>;

    /// Deletes all line items of a sale. Returns how many rows went away.
    async fn delete_line_items(&self, sale_id: SaleId) -> DbResult<u64>;

    /// Deletes a sale header.
    async fn delete_header(&self, sale_id: SaleId) -> DbResult<()>;
}
