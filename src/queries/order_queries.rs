use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{NewOrder, Order},
};

/// Reserves stock and records the order in one transaction.
/// Returns `None` when the product no longer holds `ordered_qty` units; in that
/// case the transaction is rolled back and nothing is written.
pub async fn create_order_reserving_stock(pool: &PgPool, order: &NewOrder) -> Result<Option<Order>> {
    let mut tx = pool.begin().await?;

    // Guarded decrement: concurrent placements serialize on the row lock and
    // the loser sees the updated quantity.
    let reserved = sqlx::query(
        "UPDATE products
         SET available_quantity = available_quantity - $1
         WHERE id = $2 AND available_quantity >= $1",
    )
    .bind(order.ordered_qty)
    .bind(order.product_id)
    .execute(&mut *tx)
    .await?;

    if reserved.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO carts (id, product_id, product_name, ordered_qty, total_price, user_email,
         payment_status, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING *",
    )
    .bind(order.id)
    .bind(order.product_id)
    .bind(&order.product_name)
    .bind(order.ordered_qty)
    .bind(order.total_price)
    .bind(&order.user_email)
    .bind(order.payment_status)
    .bind(order.created_at)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(order))
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM carts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(order)
}

pub async fn get_user_orders(pool: &PgPool, email: &str) -> Result<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM carts WHERE user_email = $1 ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    Ok(orders)
}

pub async fn mark_paid(pool: &PgPool, id: Uuid) -> Result<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE carts SET payment_status = 'paid' WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(order)
}
