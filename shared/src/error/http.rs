//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::UserNotFound | Self::VoucherNotFound => StatusCode::NOT_FOUND,

            // 403 Forbidden
            Self::NotOrderCustomer => StatusCode::FORBIDDEN,

            // 402 Payment Required
            Self::WalletInsufficientBalance => StatusCode::PAYMENT_REQUIRED,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request
            Self::ValidationFailed | Self::OrderNotFinished => StatusCode::BAD_REQUEST,
        }
    }
}
