use axum::{Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Comment, CreateCommentRequest},
    queries::comment_queries,
};

pub async fn get_comments(State(state): State<AppState>) -> Result<Json<Vec<Comment>>> {
    let comments = comment_queries::all(&state.db).await?;

    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<Comment>> {
    if payload.comment.trim().is_empty() {
        return Err(AppError::BadRequest("Comment cannot be empty".to_string()));
    }

    let comment = comment_queries::create(&state.db, &payload).await?;

    Ok(Json(comment))
}
