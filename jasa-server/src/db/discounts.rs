//! Discount catalog queries (vouchers and promos)

use shared::models::{Promo, Voucher};
use sqlx::{PgExecutor, PgPool};

pub async fn list_vouchers(pool: &PgPool) -> Result<Vec<Voucher>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT d.kode AS code, d.potongan AS discount_amount,
               d.mintrpemesanan AS min_order_threshold,
               v.jmlhariberlaku AS validity_days, v.kuotapenggunaan AS usage_quota,
               v.harga AS price
        FROM voucher v
        JOIN diskon d ON v.kode = d.kode
        ORDER BY d.kode
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_promos(pool: &PgPool) -> Result<Vec<Promo>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT d.kode AS code, d.potongan AS discount_amount,
               d.mintrpemesanan AS min_order_threshold,
               p.tglakhirberlaku AS expiry_date
        FROM promo p
        JOIN diskon d ON p.kode = d.kode
        ORDER BY d.kode
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Runs on the pool or inside a purchase transaction
pub async fn find_voucher<'e, E>(executor: E, code: &str) -> Result<Option<Voucher>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as(
        r#"
        SELECT d.kode AS code, d.potongan AS discount_amount,
               d.mintrpemesanan AS min_order_threshold,
               v.jmlhariberlaku AS validity_days, v.kuotapenggunaan AS usage_quota,
               v.harga AS price
        FROM voucher v
        JOIN diskon d ON v.kode = d.kode
        WHERE v.kode = $1
        "#,
    )
    .bind(code)
    .fetch_optional(executor)
    .await
}
