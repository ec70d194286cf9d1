//! Testimonial Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Customer review of a finished service order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Testimonial {
    #[serde(rename = "idTrPemesanan")]
    pub order_id: Uuid,
    #[serde(rename = "tgl")]
    pub date: NaiveDate,
    #[serde(rename = "teks")]
    pub text: String,
    pub rating: i32,
}

/// Create testimonial payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialCreate {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "pemesananId")]
    pub order_id: Uuid,
    #[serde(rename = "teks", default)]
    pub text: String,
    #[serde(default)]
    pub rating: i32,
}

/// Delete testimonial payload, keyed by order and date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestimonialDelete {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "pemesananId")]
    pub order_id: Uuid,
    #[serde(rename = "tgl")]
    pub date: NaiveDate,
}
