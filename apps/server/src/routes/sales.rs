//! Sale endpoints.
//!
//! `POST /sales` answers with exactly one of two shapes, including when the
//! session is missing or the body does not parse:
//! ```json
//! { "success": true,  "sale_id": 17 }
//! { "success": false, "error": "Login required" }
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use bingo_core::{CartLine, SaleDraft, SaleId, SaleWithDetails};

use crate::auth::CurrentCashier;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordSaleRequest {
    pub lines: Vec<CartLine>,
    pub cash_received: i64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RecordSaleResponse {
    Recorded { success: bool, sale_id: SaleId },
    Failed { success: bool, error: String },
}

impl RecordSaleResponse {
    fn recorded(sale_id: SaleId) -> Self {
        RecordSaleResponse::Recorded {
            success: true,
            sale_id,
        }
    }

    fn failed(error: String) -> Self {
        RecordSaleResponse::Failed {
            success: false,
            error,
        }
    }
}

/// POST /sales
///
/// The cashier id comes from the session, never from the body.
pub async fn record(
    State(state): State<Arc<AppState>>,
    cashier: Result<CurrentCashier, ApiError>,
    payload: Result<Json<RecordSaleRequest>, JsonRejection>,
) -> Response {
    let cashier = match cashier {
        Ok(cashier) => cashier,
        Err(err) => return failed(err.status(), err.message),
    };

    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(cashier_id = cashier.id, error = %rejection, "Sale body rejected");
            return failed(rejection.status(), rejection.body_text());
        }
    };

    match record_sale(&state, cashier.id, req).await {
        Ok(sale_id) => (
            StatusCode::CREATED,
            Json(RecordSaleResponse::recorded(sale_id)),
        )
            .into_response(),
        Err(err) => failed(err.status(), err.message),
    }
}

fn failed(status: StatusCode, error: String) -> Response {
    (status, Json(RecordSaleResponse::failed(error))).into_response()
}

#[tracing::instrument(skip(state, req), fields(lines = req.lines.len()))]
async fn record_sale(
    state: &AppState,
    cashier_id: i64,
    req: RecordSaleRequest,
) -> Result<SaleId, ApiError> {
    let draft = SaleDraft::checkout(cashier_id, req.lines, req.cash_received)?;
    let sale_id = state
        .db
        .sale_writer()
        .record_sale(&draft.header, &draft.lines)
        .await?;
    Ok(sale_id)
}

/// GET /sales/{id}
pub async fn receipt(
    State(state): State<Arc<AppState>>,
    _cashier: CurrentCashier,
    Path(id): Path<SaleId>,
) -> ApiResult<Json<SaleWithDetails>> {
    state
        .db
        .sales()
        .get_receipt(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Sale", id))
}
