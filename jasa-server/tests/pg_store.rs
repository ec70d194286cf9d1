//! PostgreSQL store tests
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p jasa-server -- --ignored`

use std::sync::Arc;

use chrono::Utc;
use jasa_server::config::DEFAULT_MYPAY_METHOD_ID;
use jasa_server::db::{DiscountStore, PgStore};
use jasa_server::error::RedemptionError;
use jasa_server::services::redemption::RedemptionService;
use rust_decimal::Decimal;
use shared::models::VoucherPurchaseCreate;
use sqlx::PgPool;
use uuid::Uuid;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

fn mypay() -> Uuid {
    Uuid::parse_str(DEFAULT_MYPAY_METHOD_ID).unwrap()
}

/// Insert a user and a voucher with fresh keys; returns (user_id, voucher_code)
async fn seed(pool: &PgPool, balance: i64, price: i64) -> (Uuid, String) {
    let user_id = Uuid::new_v4();
    let code = format!("T{}", &user_id.simple().to_string()[..10]);

    sqlx::query(r#"INSERT INTO "user" (id, nama, nohp, saldomypay) VALUES ($1, 'Tester', $2, $3)"#)
        .bind(user_id)
        .bind(&code)
        .bind(Decimal::from(balance))
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO diskon (kode, potongan, mintrpemesanan) VALUES ($1, 5000, 0)")
        .bind(&code)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO voucher (kode, jmlhariberlaku, kuotapenggunaan, harga) VALUES ($1, 30, 2, $2)",
    )
    .bind(&code)
    .bind(Decimal::from(price))
    .execute(pool)
    .await
    .unwrap();

    (user_id, code)
}

#[tokio::test]
#[ignore]
async fn pg_purchase_debits_and_records() {
    let pool = pool().await;
    let (user_id, code) = seed(&pool, 50_000, 12_500).await;
    let store = Arc::new(PgStore::new(pool));
    let service = RedemptionService::new(store.clone(), mypay());

    let receipt = service
        .buy_voucher(&VoucherPurchaseCreate {
            user_id,
            voucher_code: code.clone(),
            payment_method_id: mypay(),
        })
        .await
        .unwrap();

    assert_eq!(receipt.balance_after, Some(Decimal::from(37_500)));
    assert_eq!(
        store.wallet_balance(user_id).await.unwrap(),
        Some(Decimal::from(37_500))
    );
    let purchases = store.purchases_for_user(user_id).await.unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].id, receipt.purchase.id);
    assert_eq!(purchases[0].voucher_code, code);
    assert!(purchases[0].valid_from <= Utc::now());
}

#[tokio::test]
#[ignore]
async fn pg_unknown_user_is_reported() {
    let pool = pool().await;
    let (_, code) = seed(&pool, 0, 1_000).await;
    let store = Arc::new(PgStore::new(pool));
    let service = RedemptionService::new(store.clone(), mypay());
    let stranger = Uuid::new_v4();

    let err = service
        .buy_voucher(&VoucherPurchaseCreate {
            user_id: stranger,
            voucher_code: code,
            payment_method_id: mypay(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RedemptionError::UserNotFound(id) if id == stranger));
    assert!(store.purchases_for_user(stranger).await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn pg_concurrent_purchases_are_serialized() {
    let pool = pool().await;
    let (user_id, code) = seed(&pool, 30_000, 10_000).await;
    let store = Arc::new(PgStore::new(pool));
    let service = Arc::new(RedemptionService::new(store.clone(), mypay()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            let request = VoucherPurchaseCreate {
                user_id,
                voucher_code: code.clone(),
                payment_method_id: mypay(),
            };
            tokio::spawn(async move { service.buy_voucher(&request).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(RedemptionError::InsufficientFunds { .. }) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(
        store.wallet_balance(user_id).await.unwrap(),
        Some(Decimal::ZERO)
    );
    assert_eq!(store.purchases_for_user(user_id).await.unwrap().len(), 3);
}
