//! Discount catalog and voucher purchase endpoints

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::VoucherPurchaseCreate;
use shared::response::{DiscountCatalogResponse, StatusResponse, VoucherPurchasesResponse};
use uuid::Uuid;

use super::decode_body;
use crate::error::ServiceResult;
use crate::state::AppState;

pub const CATALOG_MESSAGE: &str = "Berhasil mendapatkan daftar voucher dan promo";
pub const PURCHASES_MESSAGE: &str = "Berhasil mendapatkan daftar pembelian voucher";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/getDiskon", get(get_diskon))
        .route("/buyVoucher", post(buy_voucher))
        .route("/getVoucherPurchases", get(get_voucher_purchases))
}

/// GET /getDiskon - every voucher and promo with its discount terms
pub async fn get_diskon(State(state): State<AppState>) -> ServiceResult<Json<DiscountCatalogResponse>> {
    let voucher = state.discounts.list_vouchers().await?;
    let promo = state.discounts.list_promos().await?;

    Ok(Json(DiscountCatalogResponse {
        status: true,
        message: CATALOG_MESSAGE.to_string(),
        voucher,
        promo,
    }))
}

/// POST /buyVoucher
///
/// Every outcome of a well-formed request is HTTP 200; the result is carried
/// in `status` and `message`.
pub async fn buy_voucher(State(state): State<AppState>, body: Bytes) -> Response {
    let request: VoucherPurchaseCreate = match decode_body(&body, "buyVoucher") {
        Ok(request) => request,
        Err(rejected) => return rejected,
    };

    let body = match state.redemption.buy_voucher(&request).await {
        Ok(receipt) => StatusResponse::success(receipt.confirmation()),
        Err(e) => StatusResponse::failure(e.user_message()),
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct PurchasesQuery {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// GET /getVoucherPurchases?userId= - purchases recorded for one user
pub async fn get_voucher_purchases(
    State(state): State<AppState>,
    query: Result<Query<PurchasesQuery>, QueryRejection>,
) -> ServiceResult<Json<VoucherPurchasesResponse>> {
    let Query(query) = query.map_err(|e| {
        tracing::debug!(error = %e, "Rejected getVoucherPurchases query");
        AppError::validation("userId is required").with_detail("field", "userId")
    })?;

    let purchases = state.discounts.purchases_for_user(query.user_id).await?;

    Ok(Json(VoucherPurchasesResponse {
        status: true,
        message: PURCHASES_MESSAGE.to_string(),
        purchases,
    }))
}
