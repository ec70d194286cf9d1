//! API routes for jasa-server

pub mod discount;
pub mod health;
pub mod testimonial;

use axum::Router;
use axum::body::Bytes;
use axum::response::{IntoResponse, Response};
use http::{HeaderValue, Method, StatusCode, header};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::BoxError;
use crate::state::AppState;

pub const INVALID_BODY_MESSAGE: &str = "invalid request body";

/// Decode a JSON request body whatever its `Content-Type`.
///
/// Malformed JSON or an ill-typed field answers 400 `invalid request body`.
pub fn decode_body<T: DeserializeOwned>(body: &Bytes, endpoint: &str) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, endpoint, "Rejected request body");
        (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE).into_response()
    })
}

/// Build a router with all routes registered (no middleware)
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(discount::router())
        .merge(testimonial::router())
        .with_state(state)
}

/// Build the served application: routes plus CORS and request tracing
pub fn build_app(state: AppState, allowed_origin: &str) -> Result<Router, BoxError> {
    Ok(create_router(state)
        // CORS - the web frontend origin only
        .layer(cors_layer(allowed_origin)?)
        // Trace - one span per request
        .layer(TraceLayer::new_for_http()))
}

/// CORS policy for a single allowed origin, with credentials
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, BoxError> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| format!("invalid CORS origin {allowed_origin:?}: {e}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}
