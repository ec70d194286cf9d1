//! Shared fixtures for router tests over the in-memory store

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use jasa_server::AppState;
use jasa_server::api;
use jasa_server::db::MemoryStore;
use rust_decimal::Decimal;
use shared::models::Voucher;
use tower::ServiceExt;
use uuid::Uuid;

pub const MYPAY: Uuid = Uuid::from_u128(0xe2ae7f92_eefb_47a7_aa1b_c7d157ab94d7);
pub const BANK_TRANSFER: Uuid = Uuid::from_u128(0xb7);

pub fn voucher(code: &str, price: i64, validity_days: i32) -> Voucher {
    Voucher {
        code: code.to_string(),
        discount_amount: Decimal::from(10_000),
        min_order_threshold: 50_000,
        validity_days,
        usage_quota: 3,
        price: Decimal::from(price),
    }
}

pub fn app(store: &Arc<MemoryStore>) -> Router {
    api::create_router(AppState::with_store(store.clone(), MYPAY))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn raw_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// JSON body sent the way a plain `fetch` does, without a JSON content type
pub fn text_plain_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn send_text(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let (status, body) = send(app, request).await;
    (status, String::from_utf8(body).unwrap())
}
