use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub product_name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub available_quantity: i32,
    pub minimum_order_quantity: i32,
    pub images: Vec<String>,
    pub demo_video: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

// Request types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Decimal,
    pub available_quantity: i32,
    pub minimum_order_quantity: i32,
    #[serde(default)]
    pub images: Vec<String>,
    pub demo_video: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: String,
    pub description: Option<String>,
    pub available_quantity: i32,
    pub minimum_order_quantity: i32,
    pub demo_video: Option<String>,
}
