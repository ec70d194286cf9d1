//! Business logic between the HTTP handlers and the stores

pub mod redemption;
pub mod testimonial;
