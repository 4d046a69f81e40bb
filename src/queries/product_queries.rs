use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{CreateProductRequest, Product, UpdateProductRequest},
};

const LATEST_PRODUCTS_LIMIT: i64 = 6;

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn latest(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products ORDER BY created_at DESC LIMIT $1",
    )
    .bind(LATEST_PRODUCTS_LIMIT)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn find_by_seller(pool: &PgPool, email: &str) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE created_by = $1 ORDER BY created_at DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn create(pool: &PgPool, req: &CreateProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (id, product_name, description, category, price, available_quantity,
         minimum_order_quantity, images, demo_video, created_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&req.product_name)
    .bind(&req.description)
    .bind(&req.category)
    .bind(req.price)
    .bind(req.available_quantity)
    .bind(req.minimum_order_quantity)
    .bind(&req.images)
    .bind(&req.demo_video)
    .bind(&req.created_by)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Returns whether a row was changed.
pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateProductRequest) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE products
         SET product_name = $1, description = $2, available_quantity = $3,
             minimum_order_quantity = $4, demo_video = $5
         WHERE id = $6",
    )
    .bind(&req.product_name)
    .bind(&req.description)
    .bind(req.available_quantity)
    .bind(req.minimum_order_quantity)
    .bind(&req.demo_video)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
