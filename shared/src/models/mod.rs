//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Rust field names are English; wire names follow the existing
//! Indonesian JSON contract through `serde(rename)`.

pub mod discount;
pub mod payment;
pub mod testimonial;
pub mod voucher_purchase;

// Re-exports
pub use discount::*;
pub use payment::*;
pub use testimonial::*;
pub use voucher_purchase::*;
