//! Database access layer
//!
//! Query modules (`discounts`, `wallet`, `voucher_purchases`, `testimonials`)
//! hold the SQL. Handlers and services only see the store traits below;
//! `PgStore` implements them on PostgreSQL and `MemoryStore` in process.

pub mod discounts;
pub mod memory;
pub mod postgres;
pub mod testimonials;
pub mod voucher_purchases;
pub mod wallet;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Promo, Testimonial, Voucher, VoucherPurchase};
use uuid::Uuid;

pub use crate::error::BoxError;
use crate::error::RedemptionError;
use crate::services::redemption::{PurchaseOrder, PurchaseReceipt};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Discount catalog, wallet ledger and voucher purchases
#[async_trait]
pub trait DiscountStore: Send + Sync {
    async fn list_vouchers(&self) -> Result<Vec<Voucher>, BoxError>;

    async fn list_promos(&self) -> Result<Vec<Promo>, BoxError>;

    /// MyPay balance, `None` when the user does not exist
    async fn wallet_balance(&self, user_id: Uuid) -> Result<Option<Decimal>, BoxError>;

    /// Resolve the voucher, settle through the wallet when the order is routed
    /// to MyPay, and record the purchase, as one unit of work.
    ///
    /// Either every effect is applied or none is: a failed record leaves the
    /// balance untouched, and two concurrent wallet purchases for one user are
    /// serialized on that user's balance.
    async fn purchase_voucher_atomic(
        &self,
        order: &PurchaseOrder,
    ) -> Result<PurchaseReceipt, RedemptionError>;

    /// Purchases of one user, newest first, ties broken by id
    async fn purchases_for_user(&self, user_id: Uuid) -> Result<Vec<VoucherPurchase>, BoxError>;
}

/// Testimonials and the service-order facts they depend on
#[async_trait]
pub trait TestimonialStore: Send + Sync {
    /// Whether `user_id` placed service order `order_id`
    async fn is_order_customer(&self, user_id: Uuid, order_id: Uuid) -> Result<bool, BoxError>;

    /// Whether the order has reached the finished status
    async fn is_order_finished(&self, order_id: Uuid) -> Result<bool, BoxError>;

    async fn insert_testimonial(&self, testimonial: &Testimonial) -> Result<(), BoxError>;

    async fn testimonials_for_subcategory(
        &self,
        subcategory_id: Uuid,
    ) -> Result<Vec<Testimonial>, BoxError>;

    /// Returns the number of removed rows
    async fn delete_testimonial(&self, order_id: Uuid, date: NaiveDate) -> Result<u64, BoxError>;
}
