use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        ChangeRoleRequest, CreateUserRequest, DeleteResponse, RoleResponse, UpdateResponse, User,
        UserStatus,
    },
    queries::user_queries,
    utils::ids::parse_id,
};

pub async fn get_all_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = user_queries::all(&state.db).await?;

    Ok(Json(users))
}

/// Answers `{}` rather than 404 for unknown emails; the frontend probes with
/// this before registering.
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>> {
    let user = user_queries::find_by_email(&state.db, &email).await?;

    let body = match user {
        Some(user) => {
            serde_json::to_value(user).map_err(|e| AppError::InternalError(e.to_string()))?
        }
        None => json!({}),
    };

    Ok(Json(body))
}

pub async fn get_user_role(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<RoleResponse>> {
    let role = user_queries::find_by_email(&state.db, &email)
        .await?
        .map(|user| user.role)
        .unwrap_or_default();

    Ok(Json(RoleResponse { role }))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<Value>> {
    if payload.email.is_empty() || !payload.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    if user_queries::find_by_email(&state.db, &payload.email)
        .await?
        .is_some()
    {
        return Ok(Json(json!({ "message": "user already exists" })));
    }

    let user = user_queries::create_user(&state.db, &payload).await?;
    tracing::info!(user_id = %user.id, "User registered");

    let body = serde_json::to_value(user).map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(Json(body))
}

pub async fn approve_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>> {
    let updated = user_queries::set_status(&state.db, parse_id(&id)?, UserStatus::Approved).await?;

    Ok(Json(UpdateResponse::from_outcome(
        updated,
        "User approved successfully",
        "User not found or already approved",
    )))
}

pub async fn block_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>> {
    let updated = user_queries::set_status(&state.db, parse_id(&id)?, UserStatus::Blocked).await?;

    Ok(Json(UpdateResponse::from_outcome(
        updated,
        "User blocked successfully",
        "Failed to block user",
    )))
}

pub async fn unblock_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateResponse>> {
    let updated = user_queries::set_status(&state.db, parse_id(&id)?, UserStatus::Active).await?;

    Ok(Json(UpdateResponse::from_outcome(
        updated,
        "User unblocked successfully",
        "Failed to unblock user",
    )))
}

pub async fn change_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChangeRoleRequest>,
) -> Result<Json<UpdateResponse>> {
    let updated = user_queries::set_role(&state.db, parse_id(&id)?, payload.role).await?;

    Ok(Json(UpdateResponse::from_outcome(
        updated,
        "User role updated successfully",
        "Failed to update role",
    )))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let deleted_count = user_queries::delete(&state.db, parse_id(&id)?).await?;

    Ok(Json(DeleteResponse {
        success: deleted_count > 0,
        deleted_count,
    }))
}
