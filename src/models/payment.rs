use serde::{Deserialize, Serialize};

/// Only the cart id is trusted; amount, product and customer come from the
/// stored order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest {
    pub cart_id: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutSessionResponse {
    pub url: String,
}
