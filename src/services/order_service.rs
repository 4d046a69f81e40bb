use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{NewOrder, Order, PlaceOrder},
    store::OrderStore,
};

const INSUFFICIENT_STOCK: &str = "Not enough stock available";

/// Order placement and the cart lookups built on top of it.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Validates `cmd` against the product and commits the order.
    ///
    /// Checks run in a fixed order and the first failure wins: the product
    /// must exist, the quantity must reach the product's minimum, and it must
    /// not exceed the stock seen at read time. The write itself re-checks
    /// stock, so a placement that lost a race is rejected the same way as one
    /// that never had enough.
    pub async fn place_order(&self, cmd: PlaceOrder) -> Result<Order> {
        let product = self
            .store
            .find_product(cmd.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if cmd.ordered_qty < product.minimum_order_quantity {
            tracing::debug!(
                product_id = %product.id,
                ordered_qty = cmd.ordered_qty,
                minimum = product.minimum_order_quantity,
                "Order below minimum quantity"
            );
            return Err(AppError::BadRequest(format!(
                "Minimum order quantity is {}",
                product.minimum_order_quantity
            )));
        }

        if cmd.ordered_qty > product.available_quantity {
            tracing::debug!(
                product_id = %product.id,
                ordered_qty = cmd.ordered_qty,
                available = product.available_quantity,
                "Order exceeds available stock"
            );
            return Err(AppError::InsufficientStock(INSUFFICIENT_STOCK.to_string()));
        }

        let new_order = NewOrder {
            id: Uuid::new_v4(),
            product_id: product.id,
            product_name: product.product_name,
            ordered_qty: cmd.ordered_qty,
            total_price: product.price * Decimal::from(cmd.ordered_qty),
            user_email: cmd.user_email,
            payment_status: cmd.payment_status,
            created_at: Utc::now(),
        };

        match self.store.commit_order(new_order).await? {
            Some(order) => {
                tracing::info!(
                    order_id = %order.id,
                    product_id = %order.product_id,
                    ordered_qty = order.ordered_qty,
                    total_price = %order.total_price,
                    "Order placed"
                );
                Ok(order)
            }
            None => {
                tracing::warn!(
                    product_id = %cmd.product_id,
                    ordered_qty = cmd.ordered_qty,
                    "Stock consumed by a concurrent order"
                );
                Err(AppError::InsufficientStock(INSUFFICIENT_STOCK.to_string()))
            }
        }
    }

    pub async fn find_order(&self, id: Uuid) -> Result<Order> {
        self.store
            .find_order(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
    }

    pub async fn orders_for_user(&self, email: &str) -> Result<Vec<Order>> {
        self.store.orders_for_user(email).await
    }

    /// Moves an order from unpaid to paid after the provider confirms it.
    pub async fn confirm_payment(&self, id: Uuid) -> Result<Order> {
        let order = self
            .store
            .mark_paid(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        tracing::info!(order_id = %order.id, "Payment confirmed");
        Ok(order)
    }
}
