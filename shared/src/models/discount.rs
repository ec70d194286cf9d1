//! Discount Models (vouchers and promos)
//!
//! Both specializations share a code-keyed `diskon` row carrying the
//! discount amount and the minimum order value it applies from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Purchasable voucher joined with its discount terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Voucher {
    #[serde(rename = "kode")]
    pub code: String,
    #[serde(rename = "potongan", with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(rename = "minTrPemesanan")]
    pub min_order_threshold: i32,
    /// Days a purchased voucher stays valid
    #[serde(rename = "jmlHariBerlaku")]
    pub validity_days: i32,
    /// Uses granted per purchase (not enforced at purchase time)
    #[serde(rename = "kuotaPenggunaan")]
    pub usage_quota: i32,
    /// Cost to acquire
    #[serde(rename = "harga", with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Auto-applied promo joined with its discount terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Promo {
    #[serde(rename = "kode")]
    pub code: String,
    #[serde(rename = "potongan", with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(rename = "minTrPemesanan")]
    pub min_order_threshold: i32,
    #[serde(rename = "tglAkhirBerlaku")]
    pub expiry_date: NaiveDate,
}
