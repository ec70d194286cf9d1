//! In-process stores for tests and local development
//!
//! All state sits behind one mutex, so a purchase holds it from lookup to
//! commit. Effects are staged and applied only after every step succeeds,
//! which gives the same all-or-nothing outcome as the PostgreSQL transaction.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Promo, Testimonial, Voucher, VoucherPurchase};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{BoxError, DiscountStore, TestimonialStore};
use crate::error::{PurchaseStage, RedemptionError};
use crate::services::redemption::{self, PurchaseOrder, PurchaseReceipt};

#[derive(Debug, Clone)]
struct ServiceOrder {
    customer_id: Uuid,
    subcategory_id: Uuid,
    finished: bool,
}

#[derive(Default)]
struct MemoryState {
    balances: HashMap<Uuid, Decimal>,
    vouchers: BTreeMap<String, Voucher>,
    promos: BTreeMap<String, Promo>,
    purchases: Vec<VoucherPurchase>,
    orders: HashMap<Uuid, ServiceOrder>,
    testimonials: Vec<Testimonial>,
    fail_at: Option<PurchaseStage>,
    unavailable: bool,
}

impl MemoryState {
    fn check_available(&self) -> Result<(), BoxError> {
        if self.unavailable {
            return Err("memory store unavailable".into());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a user with the given MyPay balance
    pub async fn insert_user(&self, user_id: Uuid, balance: Decimal) {
        self.state.lock().await.balances.insert(user_id, balance);
    }

    pub async fn insert_voucher(&self, voucher: Voucher) {
        self.state
            .lock()
            .await
            .vouchers
            .insert(voucher.code.clone(), voucher);
    }

    pub async fn insert_promo(&self, promo: Promo) {
        self.state
            .lock()
            .await
            .promos
            .insert(promo.code.clone(), promo);
    }

    pub async fn insert_order(
        &self,
        order_id: Uuid,
        customer_id: Uuid,
        subcategory_id: Uuid,
        finished: bool,
    ) {
        self.state.lock().await.orders.insert(
            order_id,
            ServiceOrder {
                customer_id,
                subcategory_id,
                finished,
            },
        );
    }

    /// Make the next purchase fail at `stage` with a storage error
    pub async fn fail_next_purchase_at(&self, stage: PurchaseStage) {
        self.state.lock().await.fail_at = Some(stage);
    }

    /// Fail every operation until switched back.
    ///
    /// `purchase_voucher_atomic` ignores this switch; use
    /// [`fail_next_purchase_at`](Self::fail_next_purchase_at) for purchases.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().await.unavailable = unavailable;
    }
}

#[async_trait]
impl DiscountStore for MemoryStore {
    async fn list_vouchers(&self) -> Result<Vec<Voucher>, BoxError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.vouchers.values().cloned().collect())
    }

    async fn list_promos(&self) -> Result<Vec<Promo>, BoxError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.promos.values().cloned().collect())
    }

    async fn wallet_balance(&self, user_id: Uuid) -> Result<Option<Decimal>, BoxError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.balances.get(&user_id).copied())
    }

    async fn purchase_voucher_atomic(
        &self,
        order: &PurchaseOrder,
    ) -> Result<PurchaseReceipt, RedemptionError> {
        let mut state = self.state.lock().await;
        let fail_at = state.fail_at.take();
        let checkpoint = |stage: PurchaseStage| match fail_at {
            Some(failing) if failing == stage => Err(RedemptionError::storage(
                stage,
                format!("injected failure at {stage}"),
            )),
            _ => Ok(()),
        };

        checkpoint(PurchaseStage::Begin)?;

        checkpoint(PurchaseStage::Lookup)?;
        let voucher = state
            .vouchers
            .get(&order.voucher_code)
            .cloned()
            .ok_or_else(|| RedemptionError::VoucherNotFound(order.voucher_code.clone()))?;
        let valid_until = redemption::validity_window(order.purchased_at, voucher.validity_days)
            .ok_or_else(|| {
                RedemptionError::storage(
                    PurchaseStage::Lookup,
                    format!("validity of {} days is out of range", voucher.validity_days),
                )
            })?;

        let balance_after = if order.route.is_wallet() {
            checkpoint(PurchaseStage::Balance)?;
            let balance = state
                .balances
                .get(&order.user_id)
                .copied()
                .ok_or(RedemptionError::UserNotFound(order.user_id))?;
            let remaining = redemption::settle_wallet(balance, voucher.price)?;
            checkpoint(PurchaseStage::Debit)?;
            Some(remaining)
        } else {
            None
        };

        checkpoint(PurchaseStage::Record)?;
        if !state.balances.contains_key(&order.user_id) {
            return Err(RedemptionError::storage(
                PurchaseStage::Record,
                format!("purchaser {} does not exist", order.user_id),
            ));
        }
        let purchase = VoucherPurchase {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            voucher_code: voucher.code.clone(),
            payment_method_id: order.payment_method_id,
            valid_from: order.purchased_at,
            valid_until,
            uses_consumed: 0,
        };

        checkpoint(PurchaseStage::Commit)?;
        if let Some(remaining) = balance_after {
            state.balances.insert(order.user_id, remaining);
        }
        state.purchases.push(purchase.clone());

        Ok(PurchaseReceipt {
            purchase,
            voucher,
            route: order.route,
            balance_after,
        })
    }

    async fn purchases_for_user(&self, user_id: Uuid) -> Result<Vec<VoucherPurchase>, BoxError> {
        let state = self.state.lock().await;
        state.check_available()?;
        let mut purchases: Vec<_> = state
            .purchases
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        purchases.sort_by(|a, b| b.valid_from.cmp(&a.valid_from).then(a.id.cmp(&b.id)));
        Ok(purchases)
    }
}

#[async_trait]
impl TestimonialStore for MemoryStore {
    async fn is_order_customer(&self, user_id: Uuid, order_id: Uuid) -> Result<bool, BoxError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state
            .orders
            .get(&order_id)
            .is_some_and(|order| order.customer_id == user_id))
    }

    async fn is_order_finished(&self, order_id: Uuid) -> Result<bool, BoxError> {
        let state = self.state.lock().await;
        state.check_available()?;
        Ok(state.orders.get(&order_id).is_some_and(|order| order.finished))
    }

    async fn insert_testimonial(&self, testimonial: &Testimonial) -> Result<(), BoxError> {
        let mut state = self.state.lock().await;
        state.check_available()?;
        let duplicate = state
            .testimonials
            .iter()
            .any(|t| t.order_id == testimonial.order_id && t.date == testimonial.date);
        if duplicate {
            return Err(format!(
                "testimonial for order {} on {} already exists",
                testimonial.order_id, testimonial.date
            )
            .into());
        }
        state.testimonials.push(testimonial.clone());
        Ok(())
    }

    async fn testimonials_for_subcategory(
        &self,
        subcategory_id: Uuid,
    ) -> Result<Vec<Testimonial>, BoxError> {
        let state = self.state.lock().await;
        state.check_available()?;
        let mut found: Vec<_> = state
            .testimonials
            .iter()
            .filter(|t| {
                state
                    .orders
                    .get(&t.order_id)
                    .is_some_and(|order| order.subcategory_id == subcategory_id)
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date).then(a.order_id.cmp(&b.order_id)));
        Ok(found)
    }

    async fn delete_testimonial(&self, order_id: Uuid, date: NaiveDate) -> Result<u64, BoxError> {
        let mut state = self.state.lock().await;
        state.check_available()?;
        let before = state.testimonials.len();
        state
            .testimonials
            .retain(|t| !(t.order_id == order_id && t.date == date));
        Ok((before - state.testimonials.len()) as u64)
    }
}
