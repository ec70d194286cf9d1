//! Testimonial rules: only the ordering customer may review a finished order,
//! and only that customer may remove the review.

use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{Testimonial, TestimonialCreate, TestimonialDelete};
use uuid::Uuid;

use crate::db::TestimonialStore;
use crate::error::ServiceResult;

pub const NOT_CUSTOMER_MESSAGE: &str = "anda bukan pelanggan yang memesan jasa ini";
pub const NOT_CUSTOMER_DELETE_MESSAGE: &str =
    "anda bukan pelanggan yang memesan jasa ini, tidak dapat menghapus testimoni";
pub const ORDER_NOT_FINISHED_MESSAGE: &str =
    "pesanan belum selesai, tidak dapat memberikan testimoni";

/// Store a testimonial dated `today`
pub async fn create(
    store: &dyn TestimonialStore,
    payload: &TestimonialCreate,
    today: NaiveDate,
) -> ServiceResult<Testimonial> {
    if !store
        .is_order_customer(payload.user_id, payload.order_id)
        .await?
    {
        return Err(AppError::with_message(ErrorCode::NotOrderCustomer, NOT_CUSTOMER_MESSAGE).into());
    }
    if !store.is_order_finished(payload.order_id).await? {
        return Err(
            AppError::with_message(ErrorCode::OrderNotFinished, ORDER_NOT_FINISHED_MESSAGE).into(),
        );
    }

    let testimonial = Testimonial {
        order_id: payload.order_id,
        date: today,
        text: payload.text.clone(),
        rating: payload.rating,
    };
    store.insert_testimonial(&testimonial).await?;

    tracing::info!(
        order_id = %testimonial.order_id,
        rating = testimonial.rating,
        "Testimonial created"
    );
    Ok(testimonial)
}

pub async fn list_for_subcategory(
    store: &dyn TestimonialStore,
    subcategory_id: Uuid,
) -> ServiceResult<Vec<Testimonial>> {
    Ok(store.testimonials_for_subcategory(subcategory_id).await?)
}

/// Remove the testimonial of an order on a given date.
///
/// Deleting a testimonial that does not exist still succeeds.
pub async fn delete(store: &dyn TestimonialStore, payload: &TestimonialDelete) -> ServiceResult<()> {
    if !store
        .is_order_customer(payload.user_id, payload.order_id)
        .await?
    {
        return Err(
            AppError::with_message(ErrorCode::NotOrderCustomer, NOT_CUSTOMER_DELETE_MESSAGE).into(),
        );
    }

    let removed = store
        .delete_testimonial(payload.order_id, payload.date)
        .await?;
    tracing::info!(
        order_id = %payload.order_id,
        date = %payload.date,
        removed,
        "Testimonial deleted"
    );
    Ok(())
}
