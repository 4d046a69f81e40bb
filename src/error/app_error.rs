use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    ConfigError(String),
    InternalError(String),
    PaymentError(String),
    NotFound(String),
    BadRequest(String),
    InsufficientStock(String),
    AuthProviderError(String),
    Unauthorized(String),
    Forbidden(String),
}

impl AppError {
    /// Stable classification sent alongside the message so clients can
    /// branch without parsing text.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "store_unavailable",
            AppError::ConfigError(_) => "config",
            AppError::InternalError(_) => "internal",
            AppError::PaymentError(_) => "payment_provider",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "invalid_argument",
            AppError::InsufficientStock(_) => "insufficient_stock",
            AppError::AuthProviderError(_) => "auth_provider",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) | AppError::AuthProviderError(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::ConfigError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::PaymentError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::InsufficientStock(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            AppError::PaymentError(msg) => write!(f, "Payment provider error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InsufficientStock(msg) => write!(f, "Insufficient stock: {}", msg),
            AppError::AuthProviderError(msg) => write!(f, "Identity provider error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::InternalError(format!("Migration failed: {}", err))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(err: std::env::VarError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let message = match self {
            AppError::DatabaseError(ref e) => {
                tracing::error!("Database error: {:?}", e);
                "Document store unavailable".to_string()
            }
            AppError::ConfigError(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Server configuration error".to_string()
            }
            AppError::InternalError(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                msg.clone()
            }
            AppError::PaymentError(ref msg) => {
                tracing::error!("Payment provider error: {}", msg);
                msg.clone()
            }
            AppError::AuthProviderError(ref msg) => {
                tracing::error!("Identity provider error: {}", msg);
                "Token verification unavailable".to_string()
            }
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::InsufficientStock(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg) => msg,
        };

        let body = Json(json!({
            "success": false,
            "message": message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_map_to_gateway_statuses() {
        let auth = AppError::AuthProviderError("timeout".to_string());
        assert_eq!(auth.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(auth.kind(), "auth_provider");

        let payment = AppError::PaymentError("declined".to_string());
        assert_eq!(payment.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn client_errors_keep_their_kind() {
        assert_eq!(AppError::BadRequest(String::new()).kind(), "invalid_argument");
        assert_eq!(
            AppError::InsufficientStock(String::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized(String::new()).status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
