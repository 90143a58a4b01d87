//! Catalog endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use bingo_core::{Product, ProductInput};

use crate::auth::{AdminCashier, CurrentCashier};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only products a cashier can sell.
    #[serde(default)]
    pub active: bool,
}

/// GET /products, ordered by name.
pub async fn list(
    State(state): State<Arc<AppState>>,
    _cashier: CurrentCashier,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = if query.active {
        state.db.products().list_active().await?
    } else {
        state.db.products().list().await?
    };

    Ok(Json(products))
}

/// POST /products
#[tracing::instrument(skip(state, admin, input), fields(admin_id = admin.0.id))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    admin: AdminCashier,
    Json(input): Json<ProductInput>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let input = input.normalized()?;
    let product = state.db.products().insert(&input).await?;

    info!(product_id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id}
#[tracing::instrument(skip(state, admin, input), fields(admin_id = admin.0.id))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    admin: AdminCashier,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<Product>> {
    let input = input.normalized()?;
    let product = state.db.products().update(id, &input).await?;

    info!(product_id = product.id, active = product.active, "Product updated");
    Ok(Json(product))
}
