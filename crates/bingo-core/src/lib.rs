//! # bingo-core: Pure Business Logic for Bingo POS
//!
//! Everything the fundraiser stand needs to reason about a sale, without
//! touching a database or the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bingo POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web frontend                                 │   │
//! │  │    Login ──► Catalog ──► Cart ──► Cash ──► Receipt              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/server (axum)                           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bingo-core (THIS CRATE) ★                       │   │
//! │  │   types • money • validation • report                           │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           bingo-db (SQLite, repositories, SaleWriter)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Cashier, SaleHeader, CartLine, ...)
//! - [`money`] - Money type with integer peso arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`report`] - Dashboard aggregation over sale rows
//!
//! ## Example Usage
//!
//! ```rust
//! use bingo_core::{CartLine, SaleDraft};
//!
//! let lines = vec![CartLine { product_id: 7, quantity: 2, unit_price: 2500 }];
//! let draft = SaleDraft::checkout(1, lines, 5000).unwrap();
//!
//! assert_eq!(draft.header.subtotal, 5000);
//! assert_eq!(draft.header.change, 0);
//! ```

pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum distinct lines allowed in a single cart.
///
/// Keeps a single sale to a size a cashier can actually check.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in a cart line.
///
/// Catches typos like 1000 instead of 10.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Label used in reports when a line item's product no longer resolves.
pub const UNKNOWN_PRODUCT: &str = "Unknown product";

/// Label used in reports when a sale's cashier no longer resolves.
pub const UNKNOWN_CASHIER: &str = "Unknown cashier";
