mod common;

use std::sync::Arc;

use common::*;
use http::StatusCode;
use jasa_server::db::{DiscountStore, MemoryStore};
use jasa_server::error::PurchaseStage;
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

const BUYER: Uuid = Uuid::from_u128(0xabc);

async fn store_with_balance(balance: i64) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_user(BUYER, Decimal::from(balance)).await;
    store.insert_voucher(voucher("HEMAT", 15_000, 7)).await;
    store
}

fn buy(user_id: Uuid, code: &str, method: Uuid) -> http::Request<axum::body::Body> {
    json_request(
        "POST",
        "/buyVoucher",
        json!({
            "userId": user_id,
            "voucherCode": code,
            "metodeBayarId": method,
        }),
    )
}

#[tokio::test]
async fn mypay_purchase_debits_and_records() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);

    let (status, body) = send_json(&app, buy(BUYER, "HEMAT", MYPAY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": true, "message": "Voucher berhasil dibeli dengan MyPay"})
    );
    assert_eq!(
        store.wallet_balance(BUYER).await.unwrap(),
        Some(Decimal::from(35_000))
    );

    let purchases = store.purchases_for_user(BUYER).await.unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].voucher_code, "HEMAT");
    assert_eq!(purchases[0].payment_method_id, MYPAY);
    assert_eq!(purchases[0].uses_consumed, 0);
    assert_eq!(
        purchases[0].valid_until - purchases[0].valid_from,
        chrono::TimeDelta::days(7)
    );
}

#[tokio::test]
async fn external_purchase_skips_wallet() {
    let store = store_with_balance(0).await;
    let app = app(&store);

    let (status, body) = send_json(&app, buy(BUYER, "HEMAT", BANK_TRANSFER)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": true, "message": "Voucher berhasil dibeli tanpa MyPay"})
    );
    assert_eq!(store.wallet_balance(BUYER).await.unwrap(), Some(Decimal::ZERO));
    assert_eq!(store.purchases_for_user(BUYER).await.unwrap().len(), 1);
}

#[tokio::test]
async fn insufficient_balance_is_reported_with_status_false() {
    let store = store_with_balance(10_000).await;
    let app = app(&store);

    let (status, body) = send_json(&app, buy(BUYER, "HEMAT", MYPAY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": false, "message": "saldo MyPay tidak cukup"})
    );
    assert_eq!(
        store.wallet_balance(BUYER).await.unwrap(),
        Some(Decimal::from(10_000))
    );
    assert!(store.purchases_for_user(BUYER).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_voucher_and_user() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);

    let (_, body) = send_json(&app, buy(BUYER, "NOPE", MYPAY)).await;
    assert_eq!(
        body,
        json!({"status": false, "message": "voucher tidak ditemukan"})
    );

    let (_, body) = send_json(&app, buy(Uuid::from_u128(0xdead), "HEMAT", MYPAY)).await;
    assert_eq!(body, json!({"status": false, "message": "user tidak ditemukan"}));
}

#[tokio::test]
async fn storage_failure_hides_details() {
    let store = store_with_balance(50_000).await;
    store.fail_next_purchase_at(PurchaseStage::Debit).await;
    let app = app(&store);

    let (status, body) = send_json(&app, buy(BUYER, "HEMAT", MYPAY)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": false, "message": "terjadi kesalahan pada server"})
    );
    assert_eq!(
        store.wallet_balance(BUYER).await.unwrap(),
        Some(Decimal::from(50_000))
    );
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);

    let (status, text) = send_text(&app, raw_request("POST", "/buyVoucher", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "invalid request body");

    let (status, _) = send_text(
        &app,
        json_request(
            "POST",
            "/buyVoucher",
            json!({"userId": "abc", "voucherCode": "HEMAT", "metodeBayarId": MYPAY}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.purchases_for_user(BUYER).await.unwrap().is_empty());
}

#[tokio::test]
async fn body_is_decoded_whatever_the_content_type() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);

    let request = text_plain_request(
        "POST",
        "/buyVoucher",
        json!({"userId": BUYER, "voucherCode": "HEMAT", "metodeBayarId": MYPAY}),
    );
    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": true, "message": "Voucher berhasil dibeli dengan MyPay"})
    );
    assert_eq!(
        store.wallet_balance(BUYER).await.unwrap(),
        Some(Decimal::from(35_000))
    );
}

#[tokio::test]
async fn missing_voucher_code_is_an_unknown_voucher() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);

    let (status, body) = send_json(
        &app,
        json_request(
            "POST",
            "/buyVoucher",
            json!({"userId": BUYER, "metodeBayarId": MYPAY}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": false, "message": "voucher tidak ditemukan"})
    );
    assert!(store.purchases_for_user(BUYER).await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);

    let (status, _) = send(&app, get("/buyVoucher")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn repeat_purchase_is_recorded_twice() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);

    for _ in 0..2 {
        let (_, body) = send_json(&app, buy(BUYER, "HEMAT", MYPAY)).await;
        assert_eq!(body["status"], true);
    }

    assert_eq!(store.purchases_for_user(BUYER).await.unwrap().len(), 2);
    assert_eq!(
        store.wallet_balance(BUYER).await.unwrap(),
        Some(Decimal::from(20_000))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_purchases_cannot_overdraw() {
    // Enough for two vouchers, not three
    let store = store_with_balance(30_000).await;
    let app = app(&store);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { send_json(&app, buy(BUYER, "HEMAT", MYPAY)).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        if body["status"] == true {
            succeeded += 1;
        } else {
            assert_eq!(body["message"], "saldo MyPay tidak cukup");
        }
    }

    assert_eq!(succeeded, 2);
    assert_eq!(store.wallet_balance(BUYER).await.unwrap(), Some(Decimal::ZERO));
    assert_eq!(store.purchases_for_user(BUYER).await.unwrap().len(), 2);
}

#[tokio::test]
async fn purchases_are_listed_for_user() {
    let store = store_with_balance(50_000).await;
    let app = app(&store);
    send_json(&app, buy(BUYER, "HEMAT", MYPAY)).await;

    let (status, body) = send_json(&app, get(&format!("/getVoucherPurchases?userId={BUYER}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], true);
    let pembelian = body["pembelian"].as_array().unwrap();
    assert_eq!(pembelian.len(), 1);
    assert_eq!(pembelian[0]["kodeVoucher"], "HEMAT");
    assert_eq!(pembelian[0]["telahDigunakan"], 0);

    let (status, body) = send_json(&app, get("/getVoucherPurchases")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], false);
}
