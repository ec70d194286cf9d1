//! PostgreSQL-backed stores

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Promo, Testimonial, Voucher, VoucherPurchase};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    BoxError, DiscountStore, TestimonialStore, discounts, testimonials, voucher_purchases, wallet,
};
use crate::error::{PurchaseStage, RedemptionError};
use crate::services::redemption::{self, PurchaseOrder, PurchaseReceipt};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscountStore for PgStore {
    async fn list_vouchers(&self) -> Result<Vec<Voucher>, BoxError> {
        Ok(discounts::list_vouchers(&self.pool).await?)
    }

    async fn list_promos(&self) -> Result<Vec<Promo>, BoxError> {
        Ok(discounts::list_promos(&self.pool).await?)
    }

    async fn wallet_balance(&self, user_id: Uuid) -> Result<Option<Decimal>, BoxError> {
        Ok(wallet::balance(&self.pool, user_id).await?)
    }

    async fn purchase_voucher_atomic(
        &self,
        order: &PurchaseOrder,
    ) -> Result<PurchaseReceipt, RedemptionError> {
        let stage = |stage: PurchaseStage| move |e: sqlx::Error| RedemptionError::storage(stage, e);

        // Dropping `tx` on any early return rolls back
        let mut tx = self.pool.begin().await.map_err(stage(PurchaseStage::Begin))?;

        let voucher = discounts::find_voucher(&mut *tx, &order.voucher_code)
            .await
            .map_err(stage(PurchaseStage::Lookup))?
            .ok_or_else(|| RedemptionError::VoucherNotFound(order.voucher_code.clone()))?;

        let valid_until = redemption::validity_window(order.purchased_at, voucher.validity_days)
            .ok_or_else(|| {
                RedemptionError::storage(
                    PurchaseStage::Lookup,
                    format!("validity of {} days is out of range", voucher.validity_days),
                )
            })?;

        let balance_after = if order.route.is_wallet() {
            let balance = wallet::lock_balance(&mut *tx, order.user_id)
                .await
                .map_err(stage(PurchaseStage::Balance))?
                .ok_or(RedemptionError::UserNotFound(order.user_id))?;
            redemption::settle_wallet(balance, voucher.price)?;
            let remaining = wallet::debit(&mut *tx, order.user_id, voucher.price)
                .await
                .map_err(stage(PurchaseStage::Debit))?;
            Some(remaining)
        } else {
            None
        };

        let purchase = voucher_purchases::record(
            &mut *tx,
            order.user_id,
            &voucher.code,
            order.payment_method_id,
            order.purchased_at,
            valid_until,
        )
        .await
        .map_err(stage(PurchaseStage::Record))?;

        tx.commit().await.map_err(stage(PurchaseStage::Commit))?;

        Ok(PurchaseReceipt {
            purchase,
            voucher,
            route: order.route,
            balance_after,
        })
    }

    async fn purchases_for_user(&self, user_id: Uuid) -> Result<Vec<VoucherPurchase>, BoxError> {
        Ok(voucher_purchases::list_for_user(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl TestimonialStore for PgStore {
    async fn is_order_customer(&self, user_id: Uuid, order_id: Uuid) -> Result<bool, BoxError> {
        Ok(testimonials::is_order_customer(&self.pool, user_id, order_id).await?)
    }

    async fn is_order_finished(&self, order_id: Uuid) -> Result<bool, BoxError> {
        Ok(testimonials::is_order_finished(&self.pool, order_id).await?)
    }

    async fn insert_testimonial(&self, testimonial: &Testimonial) -> Result<(), BoxError> {
        Ok(testimonials::insert(&self.pool, testimonial).await?)
    }

    async fn testimonials_for_subcategory(
        &self,
        subcategory_id: Uuid,
    ) -> Result<Vec<Testimonial>, BoxError> {
        Ok(testimonials::list_for_subcategory(&self.pool, subcategory_id).await?)
    }

    async fn delete_testimonial(&self, order_id: Uuid, date: NaiveDate) -> Result<u64, BoxError> {
        Ok(testimonials::delete(&self.pool, order_id, date).await?)
    }
}
