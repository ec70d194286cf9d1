//! Voucher purchase records

use chrono::{DateTime, Utc};
use shared::models::VoucherPurchase;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Insert a fresh purchase with zero uses consumed.
///
/// Not idempotent: every call creates a new row with a new id.
pub async fn record(
    conn: &mut PgConnection,
    user_id: Uuid,
    voucher_code: &str,
    payment_method_id: Uuid,
    valid_from: DateTime<Utc>,
    valid_until: DateTime<Utc>,
) -> Result<VoucherPurchase, sqlx::Error> {
    let purchase = VoucherPurchase {
        id: Uuid::new_v4(),
        user_id,
        voucher_code: voucher_code.to_string(),
        payment_method_id,
        valid_from,
        valid_until,
        uses_consumed: 0,
    };

    sqlx::query(
        "INSERT INTO tr_pembelian_voucher
            (id, tglawal, tglakhir, telahdigunakan, idpelanggan, idvoucher, idmetodebayar)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(purchase.id)
    .bind(purchase.valid_from)
    .bind(purchase.valid_until)
    .bind(purchase.uses_consumed)
    .bind(purchase.user_id)
    .bind(&purchase.voucher_code)
    .bind(purchase.payment_method_id)
    .execute(conn)
    .await?;

    Ok(purchase)
}

pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<VoucherPurchase>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, idpelanggan AS user_id, idvoucher AS voucher_code,
               idmetodebayar AS payment_method_id, tglawal AS valid_from,
               tglakhir AS valid_until, telahdigunakan AS uses_consumed
        FROM tr_pembelian_voucher
        WHERE idpelanggan = $1
        ORDER BY tglawal DESC, id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
