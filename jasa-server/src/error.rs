//! Service-layer errors
//!
//! `ServiceError` bridges storage errors (`sqlx::Error`, `BoxError`) and the
//! API-layer error (`AppError`), so handlers can propagate with `?` and storage
//! text is logged instead of reaching the client.
//!
//! `RedemptionError` is the voucher purchase taxonomy; every variant maps to a
//! fixed user-facing message.

use std::fmt;

use axum::response::IntoResponse;
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use uuid::Uuid;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Message shown to clients for any storage or infrastructure failure
pub const GENERIC_FAILURE_MESSAGE: &str = "terjadi kesalahan pada server";

/// Service-layer error
///
/// - `Db`: Database/infrastructure errors (logged, mapped to InternalError)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            // Driver text stays in `details`, which is logged but never sent
            ServiceError::Db(db_err) => {
                AppError::with_message(ErrorCode::DatabaseError, GENERIC_FAILURE_MESSAGE)
                    .with_detail("source", db_err.to_string())
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Step of the purchase unit of work, carried by storage failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseStage {
    Begin,
    Lookup,
    Balance,
    Debit,
    Record,
    Commit,
}

impl PurchaseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Lookup => "lookup",
            Self::Balance => "balance",
            Self::Debit => "debit",
            Self::Record => "record",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for PurchaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal failure of a voucher purchase
#[derive(Debug, thiserror::Error)]
pub enum RedemptionError {
    #[error("voucher {0:?} not found")]
    VoucherNotFound(String),

    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("insufficient MyPay balance: {balance} < {price}")]
    InsufficientFunds { balance: Decimal, price: Decimal },

    #[error("storage failure at {stage}: {source}")]
    Storage {
        stage: PurchaseStage,
        #[source]
        source: BoxError,
    },
}

impl RedemptionError {
    pub fn storage(stage: PurchaseStage, source: impl Into<BoxError>) -> Self {
        Self::Storage {
            stage,
            source: source.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::VoucherNotFound(_) => ErrorCode::VoucherNotFound,
            Self::UserNotFound(_) => ErrorCode::UserNotFound,
            Self::InsufficientFunds { .. } => ErrorCode::WalletInsufficientBalance,
            Self::Storage { .. } => ErrorCode::DatabaseError,
        }
    }

    /// Literal message returned in the `{status:false}` body
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::VoucherNotFound(_) => "voucher tidak ditemukan",
            Self::UserNotFound(_) => "user tidak ditemukan",
            Self::InsufficientFunds { .. } => "saldo MyPay tidak cukup",
            Self::Storage { .. } => GENERIC_FAILURE_MESSAGE,
        }
    }
}
