use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{CreateUserRequest, User, UserRole, UserStatus},
};

pub async fn all(pool: &PgPool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn create_user(pool: &PgPool, req: &CreateUserRequest) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, name, photo_url, role) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&req.email)
    .bind(&req.name)
    .bind(&req.photo_url)
    .bind(req.role)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Returns whether the status actually changed.
pub async fn set_status(pool: &PgPool, id: Uuid, status: UserStatus) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET status = $1 WHERE id = $2 AND status <> $1")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_role(pool: &PgPool, id: Uuid, role: UserRole) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET role = $1 WHERE id = $2 AND role <> $1")
        .bind(role)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
