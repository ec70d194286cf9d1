//! Payment Method Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a purchase is settled
///
/// One reserved payment-method id designates the MyPay wallet; every other
/// id is an external rail that settles out-of-band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRoute {
    MyPay,
    External,
}

impl PaymentRoute {
    pub fn classify(method_id: Uuid, mypay_method_id: Uuid) -> Self {
        if method_id == mypay_method_id {
            Self::MyPay
        } else {
            Self::External
        }
    }

    pub fn is_wallet(&self) -> bool {
        matches!(self, Self::MyPay)
    }
}
