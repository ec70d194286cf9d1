//! Unified error codes for the marketplace backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Account errors
//! - 5xxx: Payment / wallet errors
//! - 6xxx: Discount errors
//! - 7xxx: Testimonial errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Account ====================
    /// User account not found
    UserNotFound = 1001,

    // ==================== 5xxx: Payment ====================
    /// MyPay balance lower than the amount to debit
    WalletInsufficientBalance = 5001,

    // ==================== 6xxx: Discount ====================
    /// Voucher code not found
    VoucherNotFound = 6001,

    // ==================== 7xxx: Testimonial ====================
    /// Caller is not the customer of the service order
    NotOrderCustomer = 7001,
    /// Service order has not reached its finished status
    OrderNotFinished = 7002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            1001 => Ok(ErrorCode::UserNotFound),
            5001 => Ok(ErrorCode::WalletInsufficientBalance),
            6001 => Ok(ErrorCode::VoucherNotFound),
            7001 => Ok(ErrorCode::NotOrderCustomer),
            7002 => Ok(ErrorCode::OrderNotFinished),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
