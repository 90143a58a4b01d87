//! # Repository Module
//!
//! Database repository implementations for Bingo POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list_active()                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / list_active                                                │
//! │  ├── get_by_id                                                         │
//! │  ├── insert                                                            │
//! │  └── update                                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tables keep their Spanish names. Queries alias every column to the
//! English field name of the row type, so `FromRow` maps them directly.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD
//! - [`CashierRepository`](cashier::CashierRepository) - Accounts and login lookup
//! - [`SaleRepository`](sale::SaleRepository) - Sale rows, `SaleStore` impl, receipts
//! - [`ReportRepository`](report::ReportRepository) - Dashboard reads

pub mod cashier;
pub mod product;
pub mod report;
pub mod sale;
