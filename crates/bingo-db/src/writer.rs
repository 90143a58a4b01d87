//! # Sale Writer
//!
//! Records a sale as a header row plus its line items, without a
//! transaction spanning the two inserts.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        record_sale()                                    │
//! │                                                                         │
//! │  0. lines ──► qty × price ─── overflows ─► HeaderInsertFailed           │
//! │       │                                   (nothing written)             │
//! │       ▼                                                                 │
//! │  1. insert_header(header) ──── fails ───► HeaderInsertFailed            │
//! │       │                                   (nothing written)             │
//! │       │ sale_id                                                         │
//! │       ▼                                                                 │
//! │  2. priced lines ──► NewSaleLineItem { sale_id, subtotal }              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. insert_line_items(batch) ── fails ──┐                               │
//! │       │                                 ▼                               │
//! │       │                     delete_line_items(sale_id)                  │
//! │       │                     delete_header(sale_id)                      │
//! │       │                                 │                               │
//! │       │                                 ▼                               │
//! │       │                     LineItemInsertFailed { compensated }        │
//! │       ▼                                                                 │
//! │  Ok(sale_id)                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The header amounts are stored exactly as given. Checking that cash
//! covers the subtotal is the caller's job (see `SaleDraft::checkout`).
//!
//! Each store call is attempted once. A failed compensation is logged and
//! reported through `compensated: false`; it does not change which error
//! the caller gets.

use thiserror::Error;
use tracing::{error, info, warn};

use crate::store::SaleStore;
use bingo_core::{CartLine, CoreResult, NewSaleHeader, NewSaleLineItem, PricedLine, SaleId};

/// Why a sale was not recorded.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The header insert was rejected or returned no id, or a line total
    /// overflowed before anything was sent. Nothing was written.
    #[error("Could not record the sale: {detail}")]
    HeaderInsertFailed { detail: String },

    /// The header was written, the line items were not, and the header
    /// was deleted again (`compensated`) or could not be (`!compensated`).
    #[error("Could not record the sale items: {detail}")]
    LineItemInsertFailed {
        sale_id: SaleId,
        detail: String,
        compensated: bool,
    },
}

impl SaleError {
    /// True when the store holds nothing from this attempt.
    pub fn nothing_persisted(&self) -> bool {
        match self {
            SaleError::HeaderInsertFailed { .. } => true,
            SaleError::LineItemInsertFailed { compensated, .. } => *compensated,
        }
    }
}

/// Writes sales through a [`SaleStore`].
#[derive(Debug, Clone)]
pub struct SaleWriter<S> {
    store: S,
}

impl<S: SaleStore> SaleWriter<S> {
    pub fn new(store: S) -> Self {
        SaleWriter { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records one sale and returns the header id the store generated.
    ///
    /// ## Store Round Trips
    /// - success: 2 (header, line-item batch)
    /// - header failure: 1
    /// - line-item failure: 4 (header, batch, delete items, delete header)
    #[tracing::instrument(
        skip(self, header, lines),
        fields(cashier_id = header.cashier_id, subtotal = header.subtotal, lines = lines.len())
    )]
    pub async fn record_sale(
        &self,
        header: &NewSaleHeader,
        lines: &[CartLine],
    ) -> Result<SaleId, SaleError> {
        // Line totals are computed before the header exists, so an
        // overflowing line cannot leave a header behind.
        let priced = match lines
            .iter()
            .map(CartLine::priced)
            .collect::<CoreResult<Vec<PricedLine>>>()
        {
            Ok(priced) => priced,
            Err(e) => {
                warn!(error = %e, "Sale lines rejected before writing");
                return Err(SaleError::HeaderInsertFailed {
                    detail: e.to_string(),
                });
            }
        };

        let sale_id = match self.store.insert_header(header).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Sale header insert failed");
                return Err(SaleError::HeaderInsertFailed {
                    detail: e.to_string(),
                });
            }
        };

        let items: Vec<NewSaleLineItem> = priced
            .iter()
            .map(|line| NewSaleLineItem::for_sale(sale_id, line))
            .collect();

        if let Err(e) = self.store.insert_line_items(&items).await {
            warn!(sale_id, error = %e, "Line item insert failed, removing sale header");

            let compensated = self.compensate(sale_id).await;

            return Err(SaleError::LineItemInsertFailed {
                sale_id,
                detail: e.to_string(),
                compensated,
            });
        }

        info!(sale_id, "Sale recorded");
        Ok(sale_id)
    }

    /// Removes whatever the failed attempt left behind. Returns true when
    /// both deletes succeeded.
    async fn compensate(&self, sale_id: SaleId) -> bool {
        let items_removed = match self.store.delete_line_items(sale_id).await {
            Ok(_) => true,
            Err(e) => {
                error!(sale_id, error = %e, "Could not delete line items of failed sale");
                false
            }
        };

        let header_removed = match self.store.delete_header(sale_id).await {
            Ok(()) => true,
            Err(e) => {
                error!(sale_id, error = %e, "Could not delete header of failed sale");
                false
            }
        };

        items_removed && header_removed
    }
}
