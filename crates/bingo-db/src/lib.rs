//! # bingo-db: Database Layer for Bingo POS
//!
//! Database access for the Bingo POS server: SQLite through sqlx, the
//! repositories the HTTP handlers call, and the sale writer that keeps a
//! sale header from outliving a failed line-item insert.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bingo POS Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /sales)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bingo-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  SaleWriter  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │ (writer.rs)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CashierRepo   │◄───│ header       │  │   │
//! │  │   │ Migrations    │    │ SaleRepo ─────┼────│ line items   │  │   │
//! │  │   │               │    │ ReportRepo    │    │ compensation │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: cajeros, productos, ventas, detalle_ventas                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`store`] - The `SaleStore` seam the writer talks to
//! - [`writer`] - `SaleWriter` and its compensating delete
//! - [`credentials`] - Password hashing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bingo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bingo.db")).await?;
//!
//! let draft = SaleDraft::checkout(cashier_id, lines, cash_received)?;
//! let sale_id = db.sale_writer().record_sale(&draft.header, &draft.lines).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credentials;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::SaleStore;
pub use writer::{SaleError, SaleWriter};

// Repository re-exports for convenience
pub use repository::cashier::{CashierRepository, NewCashier};
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
