//! API Response types
//!
//! Every JSON endpoint answers with a boolean `status` and a literal
//! `message`, optionally followed by payload fields:
//! ```json
//! {
//!     "status": true,
//!     "message": "Voucher berhasil dibeli dengan MyPay"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Promo, Voucher, VoucherPurchase};

/// Bare status envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
        }
    }
}

/// `GET /getDiskon` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCatalogResponse {
    pub status: bool,
    pub message: String,
    pub voucher: Vec<Voucher>,
    pub promo: Vec<Promo>,
}

/// `GET /getVoucherPurchases` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherPurchasesResponse {
    pub status: bool,
    pub message: String,
    #[serde(rename = "pembelian")]
    pub purchases: Vec<VoucherPurchase>,
}
