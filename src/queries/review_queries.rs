use sqlx::PgPool;

use crate::{error::Result, models::Review};

pub async fn all(pool: &PgPool) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY date DESC")
        .fetch_all(pool)
        .await?;

    Ok(reviews)
}
