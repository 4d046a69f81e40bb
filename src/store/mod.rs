//! Store seam for the order core.
//!
//! The order service never touches a connection pool directly; it is handed
//! an [`OrderStore`] so it can run against PostgreSQL in production and an
//! in-memory store in tests.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{NewOrder, Order, Product},
};

pub use memory::MemoryOrderStore;
pub use postgres::PgOrderStore;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>>;

    /// Decrements the product's stock by `order.ordered_qty` and inserts the
    /// order as one unit. The decrement only applies while the product still
    /// holds at least that many units; otherwise nothing is written and
    /// `Ok(None)` is returned.
    async fn commit_order(&self, order: NewOrder) -> Result<Option<Order>>;

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>>;

    /// Orders placed by `email`, newest first.
    async fn orders_for_user(&self, email: &str) -> Result<Vec<Order>>;

    async fn mark_paid(&self, id: Uuid) -> Result<Option<Order>>;
}
