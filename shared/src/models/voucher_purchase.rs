//! Voucher Purchase Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One acquisition of a voucher by a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct VoucherPurchase {
    pub id: Uuid,
    #[serde(rename = "idPelanggan")]
    pub user_id: Uuid,
    #[serde(rename = "kodeVoucher")]
    pub voucher_code: String,
    #[serde(rename = "metodeBayarId")]
    pub payment_method_id: Uuid,
    #[serde(rename = "tglAwal")]
    pub valid_from: DateTime<Utc>,
    /// Always `valid_from` + the voucher's validity days, computed server-side
    #[serde(rename = "tglAkhir")]
    pub valid_until: DateTime<Utc>,
    #[serde(rename = "telahDigunakan")]
    pub uses_consumed: i32,
}

/// Buy voucher payload (`POST /buyVoucher`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherPurchaseCreate {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// Absent means empty, which matches no voucher
    #[serde(rename = "voucherCode", default)]
    pub voucher_code: String,
    #[serde(rename = "metodeBayarId")]
    pub payment_method_id: Uuid,
}
