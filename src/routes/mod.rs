mod carts;
mod comments;
mod health;
mod payments;
mod products;
mod reviews;
mod users;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

use crate::{AppState, middleware::auth_middleware};

pub fn create_router(state: AppState) -> Router<AppState> {
    let require_auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        // users
        .route("/all-user", get(users::get_all_users))
        .route("/users", post(users::create_user))
        .route("/users/{email}", get(users::get_user))
        .route("/users/{email}/role", get(users::get_user_role))
        .route("/approve-user/{id}", put(users::approve_user))
        .route("/change-role/{id}", put(users::change_role))
        .route("/blocked-user/{id}", put(users::block_user))
        .route("/unblocked-user/{id}", put(users::unblock_user))
        .route("/delete-user/{id}", delete(users::delete_user))
        // products
        .route(
            "/products",
            get(products::get_latest_products).post(products::create_product),
        )
        .route("/all-products", get(products::get_all_products))
        .route("/all-products/{id}", get(products::get_product))
        .route("/selling-products/{email}", get(products::get_seller_products))
        .route("/update-product/{id}", put(products::update_product))
        .route("/delete-product/{id}", delete(products::delete_product))
        // carts
        .route("/carts", post(carts::place_order))
        .route(
            "/carts/{email}",
            get(carts::get_user_carts).route_layer(require_auth),
        )
        .route("/carts/by-id/{id}", get(carts::get_cart))
        .route("/carts/payment-success/{id}", patch(carts::payment_success))
        // payments
        .route(
            "/create-checkout-session",
            post(payments::create_checkout_session),
        )
        // comments and reviews
        .route(
            "/comments",
            get(comments::get_comments).post(comments::create_comment),
        )
        .route("/reviews", get(reviews::get_reviews))
}
