//! Admin dashboard.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use bingo_core::{DashboardSummary, ProductSales, SaleWithDetails};

use crate::auth::AdminCashier;
use crate::error::ApiResult;
use crate::AppState;

/// GET /dashboard/summary
pub async fn summary(
    State(state): State<Arc<AppState>>,
    _admin: AdminCashier,
) -> ApiResult<Json<DashboardSummary>> {
    Ok(Json(state.db.reports().summary().await?))
}

/// GET /dashboard/products, best sellers first.
pub async fn products(
    State(state): State<Arc<AppState>>,
    _admin: AdminCashier,
) -> ApiResult<Json<Vec<ProductSales>>> {
    Ok(Json(state.db.reports().product_sales().await?))
}

/// GET /dashboard/sales, newest first.
pub async fn sales(
    State(state): State<Arc<AppState>>,
    _admin: AdminCashier,
) -> ApiResult<Json<Vec<SaleWithDetails>>> {
    Ok(Json(state.db.reports().all_sales().await?))
}
