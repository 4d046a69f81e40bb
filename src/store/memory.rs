use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::OrderStore;
use crate::{
    error::Result,
    models::{NewOrder, Order, PaymentStatus, Product},
};

/// In-process order store.
///
/// Products and orders live behind one lock, so the stock guard, the
/// decrement and the insert in [`OrderStore::commit_order`] happen in a single
/// critical section with no await point between them.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<Uuid, Product>,
    orders: Vec<Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_product(&self, product: Product) {
        self.inner.lock().await.products.insert(product.id, product);
    }

    pub async fn product(&self, id: Uuid) -> Option<Product> {
        self.inner.lock().await.products.get(&id).cloned()
    }

    pub async fn order_count(&self) -> usize {
        self.inner.lock().await.orders.len()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>> {
        Ok(self.product(id).await)
    }

    async fn commit_order(&self, order: NewOrder) -> Result<Option<Order>> {
        let mut inner = self.inner.lock().await;

        let Some(product) = inner.products.get_mut(&order.product_id) else {
            return Ok(None);
        };

        if product.available_quantity < order.ordered_qty {
            return Ok(None);
        }

        product.available_quantity -= order.ordered_qty;

        let order = Order::from(order);
        inner.orders.push(order.clone());

        Ok(Some(order))
    }

    async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
        let inner = self.inner.lock().await;
        Ok(inner.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn orders_for_user(&self, email: &str) -> Result<Vec<Order>> {
        let inner = self.inner.lock().await;
        let mut orders: Vec<Order> = inner
            .orders
            .iter()
            .filter(|o| o.user_email == email)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn mark_paid(&self, id: Uuid) -> Result<Option<Order>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.payment_status = PaymentStatus::Paid;
            order.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::dec;

    use super::*;

    fn product(available: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            product_name: "Linen shirt".to_string(),
            description: None,
            category: None,
            price: dec!(12.50),
            available_quantity: available,
            minimum_order_quantity: 1,
            images: Vec::new(),
            demo_video: None,
            created_by: "seller@x.com".to_string(),
            created_at: Utc::now(),
        }
    }

    fn new_order(product: &Product, qty: i32) -> NewOrder {
        NewOrder {
            id: Uuid::new_v4(),
            product_id: product.id,
            product_name: product.product_name.clone(),
            ordered_qty: qty,
            total_price: product.price * rust_decimal::Decimal::from(qty),
            user_email: "a@x.com".to_string(),
            payment_status: PaymentStatus::Unpaid,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn commit_decrements_and_records() {
        let store = MemoryOrderStore::new();
        let p = product(4);
        store.insert_product(p.clone()).await;

        let order = store.commit_order(new_order(&p, 4)).await.unwrap();
        assert!(order.is_some());
        assert_eq!(store.product(p.id).await.unwrap().available_quantity, 0);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn guard_failure_writes_nothing() {
        let store = MemoryOrderStore::new();
        let p = product(2);
        store.insert_product(p.clone()).await;

        let order = store.commit_order(new_order(&p, 3)).await.unwrap();
        assert!(order.is_none());
        assert_eq!(store.product(p.id).await.unwrap().available_quantity, 2);
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn mark_paid_flips_status_once_found() {
        let store = MemoryOrderStore::new();
        let p = product(5);
        store.insert_product(p.clone()).await;
        let order = store.commit_order(new_order(&p, 1)).await.unwrap().unwrap();

        let paid = store.mark_paid(order.id).await.unwrap().unwrap();
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert!(store.mark_paid(Uuid::new_v4()).await.unwrap().is_none());
    }
}
