//! Testimonial queries

use chrono::NaiveDate;
use shared::models::Testimonial;
use sqlx::PgPool;
use uuid::Uuid;

/// Status name that marks a service order as finished
pub const FINISHED_ORDER_STATUS: &str = "Pesanan selesai";

pub async fn is_order_customer(
    pool: &PgPool,
    user_id: Uuid,
    order_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT 1 FROM tr_pemesanan_jasa WHERE id = $1 AND idpelanggan = $2
         )",
    )
    .bind(order_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn is_order_finished(pool: &PgPool, order_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT 1
            FROM tr_pemesanan_status tps
            JOIN status_pesanan sp ON tps.idstatus = sp.id
            WHERE tps.idtrpemesanan = $1 AND sp.status = $2
         )",
    )
    .bind(order_id)
    .bind(FINISHED_ORDER_STATUS)
    .fetch_one(pool)
    .await
}

pub async fn insert(pool: &PgPool, testimonial: &Testimonial) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO testimoni (idtrpemesanan, tgl, teks, rating) VALUES ($1, $2, $3, $4)")
        .bind(testimonial.order_id)
        .bind(testimonial.date)
        .bind(&testimonial.text)
        .bind(testimonial.rating)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn list_for_subcategory(
    pool: &PgPool,
    subcategory_id: Uuid,
) -> Result<Vec<Testimonial>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.idtrpemesanan AS order_id, t.tgl AS date, t.teks AS text, t.rating
        FROM testimoni t
        JOIN tr_pemesanan_jasa pj ON t.idtrpemesanan = pj.id
        WHERE pj.idkategorijasa = $1
        ORDER BY t.tgl DESC, t.idtrpemesanan
        "#,
    )
    .bind(subcategory_id)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &PgPool, order_id: Uuid, date: NaiveDate) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM testimoni WHERE idtrpemesanan = $1 AND tgl = $2")
        .bind(order_id)
        .bind(date)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
