//! Unified error system
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error with code, client-facing message and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Account errors
//! - 5xxx: Payment / wallet errors
//! - 6xxx: Discount errors
//! - 7xxx: Testimonial errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::VoucherNotFound, "voucher tidak ditemukan");
//! assert_eq!(err.http_status(), shared::http::StatusCode::NOT_FOUND);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;
