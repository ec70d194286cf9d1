//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Account errors
/// - 5xxx: Payment / wallet errors
/// - 6xxx: Discount errors
/// - 7xxx: Testimonial errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Account errors (1xxx)
    Account,
    /// Payment errors (5xxx)
    Payment,
    /// Discount errors (6xxx)
    Discount,
    /// Testimonial errors (7xxx)
    Testimonial,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Account,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Discount,
            7000..8000 => Self::Testimonial,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Account => "account",
            Self::Payment => "payment",
            Self::Discount => "discount",
            Self::Testimonial => "testimonial",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
