use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        Order, PlaceOrder, PlaceOrderRequest, PlaceOrderResponse, UpdateResponse,
        UserOrdersResponse, VerifiedUser,
    },
    utils::{extractors::ensure_same_user, ids::parse_id},
};

pub async fn place_order(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>> {
    let Json(payload) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let cmd = PlaceOrder::try_from(payload)?;
    let order = state.orders.place_order(cmd).await?;

    Ok(Json(PlaceOrderResponse {
        success: true,
        message: "Order placed successfully".to_string(),
        order,
    }))
}

pub async fn get_user_carts(
    State(state): State<AppState>,
    Extension(user): Extension<VerifiedUser>,
    Path(email): Path<String>,
) -> Result<Json<UserOrdersResponse>> {
    ensure_same_user(&user, &email)?;

    let data = state.orders.orders_for_user(&email).await?;

    Ok(Json(UserOrdersResponse {
        success: true,
        data,
    }))
}

pub async fn get_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order = state.orders.find_order(parse_id(&id)?).await?;

    Ok(Json(order))
}

pub async fn payment_success(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>> {
    state.orders.confirm_payment(parse_id(&id)?).await?;

    Ok(Json(UpdateResponse {
        success: true,
        message: "Payment status updated".to_string(),
    }))
}
