//! # Bingo POS Server
//!
//! HTTP API for the fundraiser stand: login, catalog, sales and the admin
//! dashboard.
//!
//! ## Routes
//! ```text
//! GET  /health                      liveness + database check
//! POST /auth/login                  username + password → token
//! GET  /auth/me                     current cashier
//! GET  /products[?active=true]      catalog
//! POST /products            (admin) create product
//! PUT  /products/{id}       (admin) update product
//! POST /sales                       record a sale
//! GET  /sales/{id}                  receipt
//! GET  /dashboard/summary   (admin) revenue + sale count
//! GET  /dashboard/products  (admin) units + revenue per product
//! GET  /dashboard/sales     (admin) sales history with line items
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use bingo_db::{Database, DbResult};

use crate::auth::JwtManager;
use crate::config::ServerConfig;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub jwt: JwtManager,
}

impl AppState {
    pub fn new(db: Database, jwt: JwtManager) -> Self {
        AppState { db, jwt }
    }

    /// Opens the database (running migrations) and builds the token manager.
    pub async fn from_config(config: &ServerConfig) -> DbResult<Self> {
        let db = Database::new(config.db_config()).await?;
        let jwt = JwtManager::new(&config.jwt_secret, config.jwt_access_lifetime_secs);
        Ok(AppState::new(db, jwt))
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/me", get(routes::auth::me))
        .route(
            "/products",
            get(routes::products::list).post(routes::products::create),
        )
        .route("/products/{id}", put(routes::products::update))
        .route("/sales", post(routes::sales::record))
        .route("/sales/{id}", get(routes::sales::receipt))
        .route("/dashboard/summary", get(routes::dashboard::summary))
        .route("/dashboard/products", get(routes::dashboard::products))
        .route("/dashboard/sales", get(routes::dashboard::sales))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
