use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    utils::ids::parse_id,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(AppError::BadRequest(format!(
                "Unknown payment status: {}",
                other
            ))),
        }
    }
}

// DB models

/// A cart entry. Created only by order placement and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub ordered_qty: i32,
    pub total_price: Decimal,
    pub user_email: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Everything the store needs to commit a placement in one unit.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub ordered_qty: i32,
    pub total_price: Decimal,
    pub user_email: String,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<NewOrder> for Order {
    fn from(order: NewOrder) -> Self {
        Self {
            id: order.id,
            product_id: order.product_id,
            product_name: order.product_name,
            ordered_qty: order.ordered_qty,
            total_price: order.total_price,
            user_email: order.user_email,
            payment_status: order.payment_status,
            created_at: order.created_at,
        }
    }
}

// Request types

/// Raw `POST /carts` body. Fields stay loose so that malformed input is
/// reported as an invalid argument instead of a framework rejection.
/// A caller-supplied `productName` is accepted on the wire but ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub product_id: Option<serde_json::Value>,
    pub ordered_qty: Option<serde_json::Value>,
    pub user_email: Option<String>,
    pub payment_status: Option<String>,
}

/// A decoded placement command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub product_id: Uuid,
    pub ordered_qty: i32,
    pub user_email: String,
    pub payment_status: PaymentStatus,
}

impl TryFrom<PlaceOrderRequest> for PlaceOrder {
    type Error = AppError;

    fn try_from(req: PlaceOrderRequest) -> Result<Self> {
        let product_id = req
            .product_id
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("productId is required".to_string()))
            .and_then(|value| match value {
                serde_json::Value::String(raw) => parse_id(raw),
                other => Err(AppError::BadRequest(format!(
                    "Invalid identifier: {}",
                    other
                ))),
            })?;

        let ordered_qty = req
            .ordered_qty
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("orderedQty is required".to_string()))
            .and_then(parse_quantity)?;

        let user_email = req
            .user_email
            .map(|email| email.trim().to_string())
            .filter(|email| email.contains('@'))
            .ok_or_else(|| AppError::BadRequest("A valid userEmail is required".to_string()))?;

        let payment_status = match req.payment_status.as_deref() {
            Some(status) => status.parse()?,
            None => PaymentStatus::default(),
        };

        Ok(Self {
            product_id,
            ordered_qty,
            user_email,
            payment_status,
        })
    }
}

fn parse_quantity(value: &serde_json::Value) -> Result<i32> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| AppError::BadRequest("orderedQty must be an integer".to_string()))
}

// Response types

#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub message: String,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct UserOrdersResponse {
    pub success: bool,
    pub data: Vec<Order>,
}
