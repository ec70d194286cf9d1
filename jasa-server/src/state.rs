//! Application state for jasa-server

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::config::Config;
use crate::db::{DiscountStore, PgStore, TestimonialStore};
use crate::error::BoxError;
use crate::services::redemption::RedemptionService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Discount catalog, wallet and purchases
    pub discounts: Arc<dyn DiscountStore>,
    /// Testimonials and service-order lookups
    pub testimonials: Arc<dyn TestimonialStore>,
    /// Voucher purchase orchestrator
    pub redemption: Arc<RedemptionService>,
}

impl AppState {
    /// Connect to PostgreSQL, migrate, and wire the stores
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.database_url)
            .await?;

        if config.run_migrations {
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self::with_store(
            Arc::new(PgStore::new(pool)),
            config.mypay_method_id,
        ))
    }

    /// Build state over any store implementing both traits
    pub fn with_store<S>(store: Arc<S>, mypay_method_id: Uuid) -> Self
    where
        S: DiscountStore + TestimonialStore + 'static,
    {
        let discounts: Arc<dyn DiscountStore> = store.clone();
        let testimonials: Arc<dyn TestimonialStore> = store;
        Self {
            redemption: Arc::new(RedemptionService::new(
                discounts.clone(),
                mypay_method_id,
            )),
            discounts,
            testimonials,
        }
    }
}
