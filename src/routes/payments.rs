use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CheckoutSessionRequest, CheckoutSessionResponse, PaymentStatus},
    services::stripe_service,
    utils::ids::parse_id,
};

pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>> {
    let order = state.orders.find_order(parse_id(&payload.cart_id)?).await?;

    if order.payment_status == PaymentStatus::Paid {
        return Err(AppError::BadRequest("Order is already paid".to_string()));
    }

    let url = stripe_service::create_checkout_session(&state.http, &state.stripe, &order).await?;

    Ok(Json(CheckoutSessionResponse { url }))
}
