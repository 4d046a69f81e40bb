use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub user_name: String,
    pub user_email: String,
    pub user_photo: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub product_id: Option<Uuid>,
    pub user_name: String,
    pub user_email: String,
    pub user_photo: Option<String>,
    pub comment: String,
}
