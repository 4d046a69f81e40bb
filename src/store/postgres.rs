use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::OrderStore;
use crate::{
    error::Result,
    models::{NewOrder, Order, Product},
    queries::{order_queries, product_queries},
};

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>> {
        product_queries::find_by_id(&self.pool, id).await
    }

    async fn commit_order(&self, order: NewOrder) -> Result<Option<Order>> {
        order_queries::create_order_reserving_stock(&self.pool, &order).await
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
        order_queries::find_by_id(&self.pool, id).await
    }

    async fn orders_for_user(&self, email: &str) -> Result<Vec<Order>> {
        order_queries::get_user_orders(&self.pool, email).await
    }

    async fn mark_paid(&self, id: Uuid) -> Result<Option<Order>> {
        order_queries::mark_paid(&self.pool, id).await
    }
}
