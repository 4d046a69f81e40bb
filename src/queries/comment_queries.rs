use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{Comment, CreateCommentRequest},
};

pub async fn all(pool: &PgPool) -> Result<Vec<Comment>> {
    let comments = sqlx::query_as::<_, Comment>("SELECT * FROM comments ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(comments)
}

pub async fn create(pool: &PgPool, req: &CreateCommentRequest) -> Result<Comment> {
    let comment = sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (id, product_id, user_name, user_email, user_photo, comment)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(req.product_id)
    .bind(&req.user_name)
    .bind(&req.user_email)
    .bind(&req.user_photo)
    .bind(&req.comment)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}
