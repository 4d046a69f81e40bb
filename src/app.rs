use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use crate::{
    config::{AppConfig, StripeConfig},
    database,
    error::Result,
    routes,
    services::{FirebaseVerifier, OrderService, TokenVerifier},
    store::PgOrderStore,
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub orders: OrderService,
    pub verifier: Arc<dyn TokenVerifier>,
    pub http: reqwest::Client,
    pub stripe: StripeConfig,
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    let http_client = reqwest::Client::new();

    let state = AppState {
        orders: OrderService::new(Arc::new(PgOrderStore::new(pool.clone()))),
        verifier: Arc::new(FirebaseVerifier::new(
            config.firebase.project_id.clone(),
            http_client.clone(),
        )),
        db: pool,
        http: http_client,
        stripe: config.stripe.clone(),
    };

    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                crate::error::AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
        .allow_origin(allowed_origins);

    let app = routes::create_router(state.clone())
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

/// The bare route table bound to `state`, without CORS or body limits.
pub fn router(state: AppState) -> Router {
    routes::create_router(state.clone()).with_state(state)
}
