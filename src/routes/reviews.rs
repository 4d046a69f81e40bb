use axum::{Json, extract::State};

use crate::{AppState, error::Result, models::Review, queries::review_queries};

pub async fn get_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = review_queries::all(&state.db).await?;

    Ok(Json(reviews))
}
