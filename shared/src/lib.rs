//! Shared types for the home-services marketplace backend
//!
//! Common types used by the server and its clients: error codes,
//! discount / purchase / testimonial models and response envelopes.

pub mod error;
pub mod models;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
