//! # Domain Types
//!
//! Core domain types used throughout Bingo POS.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   SaleHeader    │   │  SaleLineItem   │       │
//! │  │  (productos)    │   │   (ventas)      │   │ (detalle_ventas)│       │
//! │  │  id             │   │  id (store)     │◄──│  sale_id        │       │
//! │  │  name, price    │◄──┼──────────────── │───│  product_id     │       │
//! │  │  image_url      │   │  cashier_id ──┐ │   │  quantity       │       │
//! │  │  active         │   │  subtotal     │ │   │  unit_price     │       │
//! │  └─────────────────┘   │  cash/change  │ │   │  subtotal       │       │
//! │                        └───────────────┼─┘   └─────────────────┘       │
//! │  ┌─────────────────┐                   │                               │
//! │  │    Cashier      │◄──────────────────┘                               │
//! │  │   (cajeros)     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Store-Generated Identity
//! Every id is an integer assigned by the store on insert. Types prefixed
//! with `New` are the insert-side shapes that do not have one yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Store-generated identifier of a sale header.
pub type SaleId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product on the stand's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Current price in pesos. Sales snapshot this into their line items.
    pub price: i64,

    /// Optional picture for the catalog grid.
    pub image_url: Option<String>,

    /// Inactive products stay in history but are hidden from the till.
    pub active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_pesos(self.price)
    }
}

/// Product form data submitted by the administrator (create and update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl ProductInput {
    /// Validates the form and returns it in canonical shape.
    ///
    /// The name is trimmed and an empty image URL becomes `None`.
    pub fn normalized(self) -> Result<ProductInput, crate::ValidationError> {
        validation::validate_product_name(&self.name)?;
        validation::validate_price(self.price)?;
        let image_url = validation::validate_image_url(self.image_url.as_deref())?;

        Ok(ProductInput {
            name: self.name.trim().to_string(),
            price: self.price,
            image_url,
            active: self.active,
        })
    }
}

// =============================================================================
// Cashier
// =============================================================================

/// What a logged-in account is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Records sales at the till.
    #[default]
    Cashier,
    /// Also sees dashboards and manages the catalog.
    Admin,
}

/// A till operator account. The password hash never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Cashier {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub active: bool,
    pub role: Role,
}

impl Cashier {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

// =============================================================================
// Sale Header
// =============================================================================

/// Header of a sale as submitted for insertion.
///
/// The amounts are taken as given; nothing here recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSaleHeader {
    pub cashier_id: i64,
    pub subtotal: i64,
    pub cash_received: i64,
    pub change: i64,
}

/// A persisted sale header (`ventas` row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleHeader {
    pub id: SaleId,
    pub cashier_id: i64,
    pub subtotal: i64,
    pub cash_received: i64,
    pub change: i64,
    /// Assigned by the store.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Line Items
// =============================================================================

/// One line of the cashier's cart: what was sold, how many, at what price.
///
/// `unit_price` is the price the cashier saw, not a fresh catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
}

impl CartLine {
    /// `quantity * unit_price`, or `AmountOutOfRange` when it overflows.
    pub fn line_total(&self) -> CoreResult<Money> {
        Money::from_pesos(self.unit_price)
            .checked_multiply_quantity(self.quantity)
            .ok_or(CoreError::AmountOutOfRange {
                product_id: self.product_id,
            })
    }

    /// Computes the line total once so it can be stored later.
    pub fn priced(&self) -> CoreResult<PricedLine> {
        Ok(PricedLine {
            line: *self,
            subtotal: self.line_total()?,
        })
    }
}

/// A cart line whose total has already been computed without overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    line: CartLine,
    subtotal: Money,
}

impl PricedLine {
    pub fn line(&self) -> &CartLine {
        &self.line
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }
}

/// A line item ready for insertion, bound to its sale header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSaleLineItem {
    pub sale_id: SaleId,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    /// Always `quantity * unit_price`.
    pub subtotal: i64,
}

impl NewSaleLineItem {
    /// Attaches a priced cart line to the header it belongs to.
    pub fn for_sale(sale_id: SaleId, priced: &PricedLine) -> Self {
        NewSaleLineItem {
            sale_id,
            product_id: priced.line.product_id,
            quantity: priced.line.quantity,
            unit_price: priced.line.unit_price,
            subtotal: priced.subtotal.pesos(),
        }
    }
}

/// A persisted line item (`detalle_ventas` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleLineItem {
    pub id: i64,
    pub sale_id: SaleId,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: i64,
    pub subtotal: i64,
}

// =============================================================================
// Sale Draft
// =============================================================================

/// A checked sale, ready to hand to the sale writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    pub header: NewSaleHeader,
    pub lines: Vec<CartLine>,
}

impl SaleDraft {
    /// Builds a sale from the cart and the cash handed over.
    ///
    /// ## Rules
    /// - cart is not empty and has at most `MAX_CART_ITEMS` lines
    /// - every quantity is 1..=`MAX_ITEM_QUANTITY`, every price is valid
    /// - cash covers the subtotal
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: 2 × Empanada $2.500     Cash: $10.000
    ///      │
    ///      ▼
    /// checkout() ← THIS FUNCTION
    ///      │
    ///      ▼
    /// header { subtotal: 5000, cash_received: 10000, change: 5000 }
    /// ```
    pub fn checkout(cashier_id: i64, lines: Vec<CartLine>, cash_received: i64) -> CoreResult<Self> {
        if lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        if lines.len() > MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        for line in &lines {
            if line.quantity > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: line.quantity,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            validation::validate_quantity(line.quantity)?;
            validation::validate_price(line.unit_price)?;
        }

        let subtotal: Money = lines.iter().map(CartLine::line_total).sum::<CoreResult<Money>>()?;

        if cash_received < subtotal.pesos() {
            return Err(CoreError::InsufficientCash {
                subtotal: subtotal.pesos(),
                cash_received,
            });
        }

        let change = Money::from_pesos(cash_received) - subtotal;

        Ok(SaleDraft {
            header: NewSaleHeader {
                cashier_id,
                subtotal: subtotal.pesos(),
                cash_received,
                change: change.pesos(),
            },
            lines,
        })
    }
}

// =============================================================================
// Dashboard Types
// =============================================================================

/// Headline numbers on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_revenue: i64,
    pub total_sales: i64,
}

/// A line item joined with its product, as read for the per-product report.
///
/// The product columns are `None` when the product row is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductSaleRow {
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub subtotal: i64,
}

/// Units and revenue per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSales {
    pub product_id: i64,
    pub name: String,
    pub units_sold: i64,
    pub revenue: i64,
}

/// A sale header joined with its cashier's name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleHeaderRow {
    pub id: SaleId,
    pub cashier_id: i64,
    pub cashier_name: Option<String>,
    pub subtotal: i64,
    pub cash_received: i64,
    pub change: i64,
    pub created_at: DateTime<Utc>,
}

/// A line item joined with its product's name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleDetailRow {
    pub id: i64,
    pub sale_id: SaleId,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub unit_price: i64,
    pub subtotal: i64,
}

/// A line item as shown on a receipt or in the sales history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleDetail {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub subtotal: i64,
}

/// A sale with its cashier name and line items. Also used as the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleWithDetails {
    pub id: SaleId,
    pub cashier_id: i64,
    pub cashier_name: String,
    pub subtotal: i64,
    pub cash_received: i64,
    pub change: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub details: Vec<SaleDetail>,
}
