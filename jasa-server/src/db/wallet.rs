//! MyPay wallet ledger
//!
//! `debit` does not compare against the current balance; callers check
//! first while holding the row lock from `lock_balance`.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

pub async fn balance<'e, E>(executor: E, user_id: Uuid) -> Result<Option<Decimal>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(r#"SELECT saldomypay FROM "user" WHERE id = $1"#)
        .bind(user_id)
        .fetch_optional(executor)
        .await
}

/// Read the balance and hold the user's row lock until the transaction ends
pub async fn lock_balance(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<Option<Decimal>, sqlx::Error> {
    sqlx::query_scalar(r#"SELECT saldomypay FROM "user" WHERE id = $1 FOR UPDATE"#)
        .bind(user_id)
        .fetch_optional(conn)
        .await
}

/// Returns the balance after the debit
pub async fn debit(
    conn: &mut PgConnection,
    user_id: Uuid,
    amount: Decimal,
) -> Result<Decimal, sqlx::Error> {
    sqlx::query_scalar(
        r#"UPDATE "user" SET saldomypay = saldomypay - $1 WHERE id = $2 RETURNING saldomypay"#,
    )
    .bind(amount)
    .bind(user_id)
    .fetch_one(conn)
    .await
}
