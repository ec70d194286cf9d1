//! Voucher purchase orchestration
//!
//! The service classifies the payment route, stamps the purchase time and
//! hands the order to the store's atomic purchase. Settlement rules
//! (`validity_window`, `settle_wallet`) are plain functions shared by every
//! store implementation.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use shared::models::{PaymentRoute, Voucher, VoucherPurchase, VoucherPurchaseCreate};
use uuid::Uuid;

use crate::db::DiscountStore;
use crate::error::RedemptionError;

/// A purchase request after routing, ready for the store
#[derive(Debug, Clone)]
pub struct PurchaseOrder {
    pub user_id: Uuid,
    pub voucher_code: String,
    pub payment_method_id: Uuid,
    pub route: PaymentRoute,
    pub purchased_at: DateTime<Utc>,
}

/// Outcome of a committed purchase
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    pub purchase: VoucherPurchase,
    pub voucher: Voucher,
    pub route: PaymentRoute,
    /// Wallet balance after the debit, `None` for external payments
    pub balance_after: Option<Decimal>,
}

impl PurchaseReceipt {
    pub fn confirmation(&self) -> &'static str {
        match self.route {
            PaymentRoute::MyPay => "Voucher berhasil dibeli dengan MyPay",
            PaymentRoute::External => "Voucher berhasil dibeli tanpa MyPay",
        }
    }
}

/// End of the validity window, `validity_days` whole days after `from`.
///
/// `None` when the result falls outside the representable date range.
pub fn validity_window(from: DateTime<Utc>, validity_days: i32) -> Option<DateTime<Utc>> {
    let days = TimeDelta::try_days(i64::from(validity_days))?;
    from.checked_add_signed(days)
}

/// Balance left after paying `price`, or `InsufficientFunds`.
///
/// A balance exactly equal to the price is sufficient.
pub fn settle_wallet(balance: Decimal, price: Decimal) -> Result<Decimal, RedemptionError> {
    if balance < price {
        return Err(RedemptionError::InsufficientFunds { balance, price });
    }
    Ok(balance - price)
}

pub struct RedemptionService {
    store: Arc<dyn DiscountStore>,
    mypay_method_id: Uuid,
}

impl RedemptionService {
    pub fn new(store: Arc<dyn DiscountStore>, mypay_method_id: Uuid) -> Self {
        Self {
            store,
            mypay_method_id,
        }
    }

    pub async fn buy_voucher(
        &self,
        request: &VoucherPurchaseCreate,
    ) -> Result<PurchaseReceipt, RedemptionError> {
        self.buy_voucher_at(request, Utc::now()).await
    }

    /// Purchase with an explicit purchase time
    pub async fn buy_voucher_at(
        &self,
        request: &VoucherPurchaseCreate,
        now: DateTime<Utc>,
    ) -> Result<PurchaseReceipt, RedemptionError> {
        let route = PaymentRoute::classify(request.payment_method_id, self.mypay_method_id);
        let order = PurchaseOrder {
            user_id: request.user_id,
            voucher_code: request.voucher_code.clone(),
            payment_method_id: request.payment_method_id,
            route,
            purchased_at: now,
        };

        let result = self.store.purchase_voucher_atomic(&order).await;
        match &result {
            Ok(receipt) => tracing::info!(
                user_id = %order.user_id,
                voucher = %order.voucher_code,
                route = ?route,
                purchase_id = %receipt.purchase.id,
                price = %receipt.voucher.price,
                "Voucher purchased"
            ),
            Err(RedemptionError::Storage { stage, source }) => tracing::error!(
                user_id = %order.user_id,
                voucher = %order.voucher_code,
                route = ?route,
                stage = %stage,
                error = %source,
                "Voucher purchase failed"
            ),
            Err(e) => tracing::warn!(
                user_id = %order.user_id,
                voucher = %order.voucher_code,
                route = ?route,
                code = %e.code(),
                reason = %e,
                "Voucher purchase rejected"
            ),
        }
        result
    }
}
