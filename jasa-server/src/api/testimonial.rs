//! Testimonial endpoints
//!
//! These answer in plain text rather than the JSON status envelope.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::Deserialize;
use shared::models::{TestimonialCreate, TestimonialDelete};
use uuid::Uuid;

use super::decode_body;
use crate::error::{GENERIC_FAILURE_MESSAGE, ServiceError};
use crate::services::testimonial;
use crate::state::AppState;

pub const CREATED_MESSAGE: &str = "Testimoni berhasil ditambahkan";
pub const DELETED_MESSAGE: &str = "Testimoni berhasil dihapus";
pub const SUBCATEGORY_REQUIRED_MESSAGE: &str = "subkategori_id is required";
pub const INVALID_SUBCATEGORY_MESSAGE: &str = "invalid subkategori_id";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/createTestimoni", post(create_testimoni))
        .route("/getTestimoni", get(get_testimoni))
        .route(
            "/deleteTestimoni",
            post(delete_testimoni).delete(delete_testimoni),
        )
}

fn text_error(error: ServiceError) -> Response {
    match error {
        ServiceError::App(e) => (StatusCode::BAD_REQUEST, e.message).into_response(),
        ServiceError::Db(e) => {
            tracing::error!(error = %e, "Testimonial storage error");
            (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE).into_response()
        }
    }
}

/// POST /createTestimoni
pub async fn create_testimoni(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: TestimonialCreate = match decode_body(&body, "createTestimoni") {
        Ok(payload) => payload,
        Err(rejected) => return rejected,
    };

    let today = Local::now().date_naive();
    match testimonial::create(state.testimonials.as_ref(), &payload, today).await {
        Ok(_) => (StatusCode::OK, CREATED_MESSAGE).into_response(),
        Err(e) => text_error(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct SubcategoryQuery {
    pub subkategori_id: Option<String>,
}

/// GET /getTestimoni?subkategori_id=
pub async fn get_testimoni(
    State(state): State<AppState>,
    Query(query): Query<SubcategoryQuery>,
) -> Response {
    let raw = match query.subkategori_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return (StatusCode::BAD_REQUEST, SUBCATEGORY_REQUIRED_MESSAGE).into_response(),
    };
    let Ok(subcategory_id) = Uuid::parse_str(raw) else {
        return (StatusCode::BAD_REQUEST, INVALID_SUBCATEGORY_MESSAGE).into_response();
    };

    match testimonial::list_for_subcategory(state.testimonials.as_ref(), subcategory_id).await {
        Ok(found) => Json(found).into_response(),
        Err(e) => text_error(e),
    }
}

/// POST|DELETE /deleteTestimoni
pub async fn delete_testimoni(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: TestimonialDelete = match decode_body(&body, "deleteTestimoni") {
        Ok(payload) => payload,
        Err(rejected) => return rejected,
    };

    match testimonial::delete(state.testimonials.as_ref(), &payload).await {
        Ok(()) => (StatusCode::OK, DELETED_MESSAGE).into_response(),
        Err(e) => text_error(e),
    }
}
