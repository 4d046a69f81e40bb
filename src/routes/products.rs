use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CreateProductRequest, DeleteResponse, Product, UpdateProductRequest, UpdateResponse},
    queries::product_queries,
    utils::ids::parse_id,
};

pub async fn get_latest_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = product_queries::latest(&state.db).await?;

    Ok(Json(products))
}

pub async fn get_all_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = product_queries::all(&state.db).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = product_queries::find_by_id(&state.db, parse_id(&id)?)
        .await?
        .ok_or(AppError::NotFound("Product not found".to_string()))?;

    Ok(Json(product))
}

pub async fn get_seller_products(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Product>>> {
    let products = product_queries::find_by_seller(&state.db, &email).await?;

    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<Product>> {
    if payload.product_name.trim().is_empty() {
        return Err(AppError::BadRequest("productName is required".to_string()));
    }

    if payload.price < Decimal::ZERO {
        return Err(AppError::BadRequest("price cannot be negative".to_string()));
    }

    validate_quantities(payload.available_quantity, payload.minimum_order_quantity)?;

    let product = product_queries::create(&state.db, &payload).await?;
    tracing::info!(product_id = %product.id, "Product created");

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<UpdateResponse>> {
    let id = parse_id(&id)?;
    validate_quantities(payload.available_quantity, payload.minimum_order_quantity)?;

    let updated = product_queries::update(&state.db, id, &payload).await?;

    Ok(Json(UpdateResponse::from_outcome(
        updated,
        "Product updated successfully",
        "No changes made or product not found",
    )))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted_count = product_queries::delete(&state.db, parse_id(&id)?).await?;

    Ok(Json(DeleteResponse {
        success: deleted_count > 0,
        deleted_count,
    }))
}

fn validate_quantities(available: i32, minimum: i32) -> Result<()> {
    if available < 0 {
        return Err(AppError::BadRequest(
            "availableQuantity cannot be negative".to_string(),
        ));
    }

    if minimum < 1 {
        return Err(AppError::BadRequest(
            "minimumOrderQuantity must be at least 1".to_string(),
        ));
    }

    Ok(())
}
