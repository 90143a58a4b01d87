//! HTTP handlers, one module per resource.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod sales;
