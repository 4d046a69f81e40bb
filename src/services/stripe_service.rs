use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    config::StripeConfig,
    error::{AppError, Result},
    models::Order,
};

const CHECKOUT_SESSIONS_PATH: &str = "/v1/checkout/sessions";
const CURRENCY: &str = "usd";

/// Form fields for a one-line hosted checkout covering the whole order.
pub fn checkout_form(config: &StripeConfig, order: &Order) -> Result<Vec<(String, String)>> {
    let unit_amount = (order.total_price * Decimal::from(100))
        .round()
        .to_i64()
        .filter(|cents| *cents > 0)
        .ok_or_else(|| {
            AppError::BadRequest(format!("Order total {} cannot be charged", order.total_price))
        })?;

    let fields = [
        ("payment_method_types[0]", "card".to_string()),
        ("line_items[0][price_data][currency]", CURRENCY.to_string()),
        ("line_items[0][price_data][unit_amount]", unit_amount.to_string()),
        (
            "line_items[0][price_data][product_data][name]",
            order.product_name.clone(),
        ),
        ("line_items[0][quantity]", "1".to_string()),
        ("customer_email", order.user_email.clone()),
        ("mode", "payment".to_string()),
        ("metadata[cartId]", order.id.to_string()),
        (
            "success_url",
            format!(
                "{}/dashboard/payment-success?cartId={}",
                config.site_domain, order.id
            ),
        ),
        (
            "cancel_url",
            format!("{}/dashboard/payment-cancelled", config.site_domain),
        ),
    ];

    Ok(fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect())
}

/// Creates a hosted checkout session and returns its redirect URL.
pub async fn create_checkout_session(
    client: &reqwest::Client,
    config: &StripeConfig,
    order: &Order,
) -> Result<String> {
    let form = checkout_form(config, order)?;

    let response = client
        .post(format!("{}{}", config.api_base, CHECKOUT_SESSIONS_PATH))
        .bearer_auth(&config.secret_key)
        .form(&form)
        .send()
        .await
        .map_err(|e| AppError::PaymentError(format!("Stripe request failed: {}", e)))?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::PaymentError(format!("Failed to parse Stripe response: {}", e)))?;

    if !status.is_success() {
        tracing::error!("Stripe API error response: {}", body);
        let error_message = body
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown Stripe error");
        return Err(AppError::PaymentError(format!(
            "Checkout session creation failed: {}",
            error_message
        )));
    }

    let url = body
        .get("url")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::PaymentError("Stripe response missing url".to_string()))?;

    tracing::info!(order_id = %order.id, "Checkout session created");

    Ok(url.to_string())
}
