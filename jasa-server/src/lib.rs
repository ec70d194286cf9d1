//! jasa-server: home-services marketplace backend
//!
//! - Discount catalog (vouchers and promos)
//! - Voucher purchase with optional MyPay wallet settlement
//! - Service-order testimonials

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;

pub use config::Config;
pub use state::AppState;
